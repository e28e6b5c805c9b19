use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::time::timeout;
use warp::Filter;
use serde_json::json;
use crate::config::constants::{
    DEFAULT_SERVER_PORT_RANGE_START, DEFAULT_SERVER_PORT_RANGE_END,
    MAX_SESSION_ID_LENGTH, SERVER_SHUTDOWN_GRACE_PERIOD_MS,
    SESSION_POLL_INTERVAL_MS, timeout_duration, sleep_duration_millis
};
use crate::enums::session_status::SessionStatus;
use crate::errors::{CodeHackError, CodeHackResult};
use crate::structs::issue::Issue;
use crate::ui::session_manager::SessionManager;

/// Outcome of a diff review in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffDecision {
    Apply,
    Discard,
}

pub struct DiffServer {
    session_manager: SessionManager,
    port: Option<u16>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl Default for DiffServer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffServer {
    pub fn new() -> Self {
        Self {
            session_manager: SessionManager::new(),
            port: None,
            shutdown_tx: None,
        }
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn session_url(&self, session_id: &str) -> Option<String> {
        self.port.map(|port| format!("http://127.0.0.1:{}/?session={}", port, session_id))
    }

    pub async fn start(&mut self) -> CodeHackResult<u16> {
        let port = self.find_available_port().await?;
        self.port = Some(port);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let diff_route = warp::path::end()
            .and(warp::get())
            .and(warp::query::<HashMap<String, String>>())
            .and_then(serve_diff_page);

        let routes = diff_route
            .or(api_routes(self.session_manager.clone()))
            .with(warp::cors()
                .allow_origin("http://127.0.0.1")
                .allow_origin("http://localhost")
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "POST"]));

        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let (_, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(addr, async {
                shutdown_rx.await.ok();
            })
            .map_err(|e| CodeHackError::system_error("diff server bind", &e.to_string()))?;

        tokio::spawn(server);

        log::info!("🌐 Diff server started on port {}", port);
        Ok(port)
    }

    pub fn create_session(&self, file_path: &str, language: &str, original: &str, optimized: &str, issues: Vec<Issue>) -> String {
        self.session_manager.create_session(file_path, language, original, optimized, issues)
    }

    /// Waits until the browser applies or cancels the session. A timeout
    /// counts as a discard.
    pub async fn wait_for_decision(&self, session_id: &str, timeout_minutes: u64) -> CodeHackResult<DiffDecision> {
        let result = timeout(timeout_duration(timeout_minutes), async {
            loop {
                match self.session_manager.get_session(session_id).map(|session| session.status) {
                    Some(SessionStatus::Applied) => return Ok(DiffDecision::Apply),
                    Some(SessionStatus::Cancelled) => return Ok(DiffDecision::Discard),
                    Some(SessionStatus::Active) => {
                        tokio::time::sleep(sleep_duration_millis(SESSION_POLL_INTERVAL_MS)).await;
                    }
                    None => {
                        return Err(CodeHackError::invalid_input(
                            session_id,
                            "an existing diff session",
                            "Start the diff review again",
                        ));
                    }
                }
            }
        }).await;

        match result {
            Ok(decision) => decision,
            Err(_) => {
                log::warn!("⏰ Diff review session timed out after {} minutes", timeout_minutes);
                Ok(DiffDecision::Discard)
            }
        }
    }

    pub async fn shutdown(&mut self) -> CodeHackResult<()> {
        log::info!("🛑 Shutting down diff server...");

        self.session_manager.cleanup_expired_sessions(chrono::Duration::zero());

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx.send(()).map_err(|_|
                CodeHackError::system_error("shutdown", "Failed to send shutdown signal")
            )?;
        }

        tokio::time::sleep(sleep_duration_millis(SERVER_SHUTDOWN_GRACE_PERIOD_MS)).await;
        log::info!("✅ Diff server shutdown complete");

        Ok(())
    }

    async fn find_available_port(&self) -> CodeHackResult<u16> {
        for port in DEFAULT_SERVER_PORT_RANGE_START..DEFAULT_SERVER_PORT_RANGE_END {
            if let Ok(listener) = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await {
                drop(listener);
                return Ok(port);
            }
        }
        Err(CodeHackError::system_error(
            "diff server start",
            &format!("no free port between {} and {}", DEFAULT_SERVER_PORT_RANGE_START, DEFAULT_SERVER_PORT_RANGE_END),
        ))
    }
}

pub fn api_routes(
    session_manager: SessionManager,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let session_manager_filter = warp::any().map(move || session_manager.clone());

    let get_session = warp::path!("api" / "session" / String)
        .and(warp::get())
        .and(session_manager_filter.clone())
        .and_then(get_session_handler);

    let apply_session = warp::path!("api" / "session" / String / "apply")
        .and(warp::post())
        .and(session_manager_filter.clone())
        .and_then(apply_session_handler);

    let cancel_session = warp::path!("api" / "session" / String / "cancel")
        .and(warp::post())
        .and(session_manager_filter)
        .and_then(cancel_session_handler);

    get_session
        .or(apply_session)
        .or(cancel_session)
}

async fn serve_diff_page(params: HashMap<String, String>) -> Result<impl warp::Reply, Infallible> {
    let session_id = params.get("session")
        .map(|s| sanitize_session_id(s))
        .unwrap_or_default();

    let html = include_str!("static/index.html")
        .replace("{{SESSION_ID}}", &session_id);

    Ok(warp::reply::html(html))
}

fn sanitize_session_id(session_id: &str) -> String {
    session_id.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_SESSION_ID_LENGTH)
        .collect()
}

async fn get_session_handler(session_id: String, session_manager: SessionManager) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    if sanitized_session_id.is_empty() {
        return Ok(warp::reply::json(&json!({
            "error": "Invalid session ID"
        })));
    }

    match session_manager.get_session(&sanitized_session_id) {
        Some(session) => Ok(warp::reply::json(&session)),
        None => Ok(warp::reply::json(&json!({
            "error": "Session not found"
        }))),
    }
}

async fn apply_session_handler(session_id: String, session_manager: SessionManager) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    let success = !sanitized_session_id.is_empty() && session_manager.apply_session(&sanitized_session_id);

    Ok(warp::reply::json(&json!({
        "success": success,
        "message": if success { "Optimized code applied" } else { "Session not found or already decided" }
    })))
}

async fn cancel_session_handler(session_id: String, session_manager: SessionManager) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    let success = !sanitized_session_id.is_empty() && session_manager.cancel_session(&sanitized_session_id);

    Ok(warp::reply::json(&json!({
        "success": success,
        "message": if success { "Session cancelled" } else { "Session not found or already decided" }
    })))
}
