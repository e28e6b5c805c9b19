use std::io::Write;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_INTERVAL: Duration = Duration::from_millis(150);

/// Spinner on stderr shown while a request is in flight.
pub struct AnimatedLogger {
    message: String,
    started_at: Instant,
    stop_sender: Option<oneshot::Sender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl AnimatedLogger {
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let label = message.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(FRAME_INTERVAL);

            for frame in FRAMES.iter().cycle() {
                tokio::select! {
                    _ = interval.tick() => {
                        eprint!("\r{} {} ", label, frame);
                        let _ = std::io::stderr().flush();
                    }
                    _ = &mut stop_rx => break,
                }
            }
        });

        Self {
            message,
            started_at: Instant::now(),
            stop_sender: Some(stop_tx),
            task_handle: Some(handle),
        }
    }

    pub async fn stop(mut self, final_message: &str) {
        self.halt().await;
        eprintln!("\r\x1b[K✅  {}: {} ({:.1}s)", self.message, final_message, self.started_at.elapsed().as_secs_f64());
    }

    pub async fn error(mut self, error_message: &str) {
        self.halt().await;
        eprintln!("\r\x1b[K❌ {}: {}", self.message, error_message);
    }

    async fn halt(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for AnimatedLogger {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}
