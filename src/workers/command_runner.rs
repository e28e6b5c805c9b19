use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use crate::adapters::extension_host::ExtensionHost;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::walker_action::WalkerAction;
use crate::enums::walker_state::WalkerState;
use crate::errors::{CodeHackError, CodeHackResult, ErrorHandler};
use crate::logger::session_logger::SessionLogger;
use crate::services::backend_client::BackendClient;
use crate::services::github_client::GitHubClient;
use crate::services::session_controller::SessionController;
use crate::structs::config::config::Config;
use crate::structs::host::host_context::HostContext;
use crate::structs::issue::Issue;
use crate::ui::diff_server::{DiffDecision, DiffServer};

/// What the user typed at the entry prompt.
#[derive(Debug, PartialEq, Eq)]
enum EntryChoice {
    Quit,
    Open(usize),
    Invalid(String),
}

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner {
    pub fn new() -> Self {
        Self {
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> CodeHackResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Validate => self.validate_command().await,
            Commands::Tree { url } => self.tree_command(&url).await,
            Commands::Detect { url, path, json } => self.detect_command(&url, &path, json).await,
            Commands::Browse { url, web } => self.browse_command(&url, web).await,
            Commands::Host { command, file, start_line, end_line, prompt, focused } => {
                self.host_command(&command, &file, start_line.zip(end_line), prompt, focused).await
            }
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::debug!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> CodeHackResult<()> {
        log::info!("🚀 Initializing codehack configuration...");

        let path = ConfigManager::create_sample_config()?;
        log::info!("✅ Configuration file created at {}", path.display());
        log::info!("🔧 Run 'codehack validate' to check your configuration.");

        Ok(())
    }

    async fn validate_command(&self) -> CodeHackResult<()> {
        log::info!("🔍 Validating codehack configuration...");

        let config = ConfigManager::load().inspect_err(|_| {
            log::error!("💡 Run 'codehack init' to create a configuration file.");
        })?;
        log::info!("✅ Configuration loaded");

        if let Err(problems) = ConfigManager::validate_config(&config) {
            log::info!("❌ Issues found:");
            for problem in &problems {
                log::info!("   - {}", problem);
            }
            return Err(CodeHackError::config_error(
                &format!("{} configuration problem(s)", problems.len()),
                None,
                Some("Fix the listed fields and run 'codehack validate' again"),
            ));
        }

        log::info!("✅ Configuration is valid");
        log::info!("🐙 GitHub: {} (branch {})", config.github.api_url, config.github.branch);
        log::info!("🧠 Backend: {}", config.backend.base_url);
        if config.github.token().is_none() {
            log::info!("⚠️ {} is not set; GitHub requests are unauthenticated", config.github.token_env);
        }

        Ok(())
    }

    async fn tree_command(&self, url: &str) -> CodeHackResult<()> {
        let config = Self::load_config()?;
        let mut controller = Self::controller(&config)?;

        controller.load_repository(url).await?;
        SessionLogger::print_tree(controller.store().entries());

        Ok(())
    }

    async fn detect_command(&self, url: &str, path: &str, json: bool) -> CodeHackResult<()> {
        let config = Self::load_config()?;
        let mut controller = Self::controller(&config)?.with_progress(!json);

        controller.load_repository(url).await?;

        let index = controller
            .store()
            .entries()
            .iter()
            .position(|entry| entry.path == path)
            .ok_or_else(|| CodeHackError::invalid_input(path, "a file path from the repository tree", "Run 'codehack tree <url>' to list paths"))?;

        controller.open_entry(index).await?;

        let store = controller.store();
        if json {
            println!("{}", serde_json::to_string_pretty(store.issues())?);
            return Ok(());
        }

        if store.issues().is_empty() {
            log::info!("✨ No issues found in {}", path);
            return Ok(());
        }

        println!("\n🔎 {} issue(s) in {} ({})", store.issues().len(), path, store.language().unwrap_or_default());
        for (i, issue) in store.issues().iter().enumerate() {
            println!("{:>4}. [{}] {}: {}", i + 1, issue.tag, issue.line_label(), issue.description);
        }

        Ok(())
    }

    async fn browse_command(&self, url: &str, web: bool) -> CodeHackResult<()> {
        let config = Self::load_config()?;
        let mut controller = Self::controller(&config)?;

        controller.load_repository(url).await?;

        loop {
            SessionLogger::print_tree(controller.store().entries());

            let input = Self::read_input("\nOpen entry number (q to quit): ")?;

            let number = match Self::entry_choice(input.as_deref()) {
                EntryChoice::Quit => {
                    log::info!("👋 Bye");
                    break;
                }
                EntryChoice::Open(number) => number,
                EntryChoice::Invalid(input) => {
                    ErrorHandler::surface(&CodeHackError::invalid_input(&input, "an entry number", "Type one of the numbers from the listing"));
                    continue;
                }
            };

            if let Err(e) = controller.open_entry(number.saturating_sub(1)).await {
                ErrorHandler::surface(&e);
                continue;
            }

            if controller.store().issues().is_empty() {
                log::info!("✨ No issues found");
                continue;
            }

            self.review_issues(&mut controller, &config, web).await?;
        }

        Ok(())
    }

    async fn review_issues(&self, controller: &mut SessionController, config: &Config, web: bool) -> CodeHackResult<()> {
        loop {
            match controller.store().walker() {
                WalkerState::Reviewing(_) => {
                    SessionLogger::print_current_issue(controller.store(), config.output.context_lines);

                    let input = Self::read_input("\n[n]ext [p]revious [space] toggle [o]ptimize [q] close: ")?;
                    let Some(action) = Self::walker_action(controller, input.as_deref()) else {
                        log::info!("Unknown key, try again.");
                        continue;
                    };

                    if let Err(e) = controller.dispatch(action).await {
                        ErrorHandler::surface(&e);
                    }
                }
                WalkerState::DiffReady => {
                    let decision = match self.review_diff(controller, config, web).await {
                        Ok(decision) => decision,
                        Err(e) => {
                            ErrorHandler::surface(&e);
                            DiffDecision::Discard
                        }
                    };

                    match decision {
                        DiffDecision::Apply => {
                            controller.dispatch(WalkerAction::Apply).await?;
                            log::info!("✅ Optimized code applied to the buffer");
                            if let Err(e) = self.offer_save(controller, config) {
                                ErrorHandler::surface(&e);
                            }
                        }
                        DiffDecision::Discard => {
                            controller.dispatch(WalkerAction::Close).await?;
                            log::info!("⏭️ Optimized code discarded");
                        }
                    }
                }
                WalkerState::Optimizing | WalkerState::Closed => return Ok(()),
            }
        }
    }

    fn entry_choice(input: Option<&str>) -> EntryChoice {
        let Some(input) = input else {
            return EntryChoice::Quit;
        };

        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return EntryChoice::Quit;
        }

        match input.parse::<usize>() {
            Ok(number) => EntryChoice::Open(number),
            Err(_) => EntryChoice::Invalid(input.to_string()),
        }
    }

    /// Maps a walker prompt answer to an action. End of input closes the
    /// walker.
    fn walker_action(controller: &SessionController, input: Option<&str>) -> Option<WalkerAction> {
        let Some(input) = input else {
            return Some(WalkerAction::Close);
        };
        let key = input.trim_end_matches(['\r', '\n']);

        match key.trim().to_lowercase().as_str() {
            "n" | "next" => Some(WalkerAction::Next),
            "p" | "prev" | "previous" => Some(WalkerAction::Previous),
            "o" | "optimize" => {
                if !matches!(controller.store().walker(), WalkerState::Reviewing(i) if i + 1 == controller.store().issues().len()) {
                    log::info!("💡 Optimize is available on the last issue");
                }
                Some(WalkerAction::Optimize)
            }
            "q" | "close" => Some(WalkerAction::Close),
            "t" | "x" | "toggle" => controller.store().current_issue().map(|(id, _)| WalkerAction::Toggle(id)),
            "" if key.starts_with(' ') => controller.store().current_issue().map(|(id, _)| WalkerAction::Toggle(id)),
            _ => None,
        }
    }

    async fn review_diff(&self, controller: &SessionController, config: &Config, web: bool) -> CodeHackResult<DiffDecision> {
        let store = controller.store();
        let (original, optimized) = store.diff_pair().ok_or_else(|| {
            CodeHackError::system_error("diff review", "no optimized content available")
        })?;
        let file_path = store.file_path().unwrap_or_default();

        if store.buffer_diverged() {
            log::warn!("⚠️ The buffer changed after detection; applying will replace those edits");
        }

        if !web {
            SessionLogger::print_diff(file_path, original, optimized);
            let input = Self::read_input("\nApply optimized code? (y/N): ")?;
            return Ok(if Self::confirmed(input.as_deref()) {
                DiffDecision::Apply
            } else {
                DiffDecision::Discard
            });
        }

        let selected: Vec<Issue> = store
            .selection()
            .iter()
            .filter_map(|id| store.issues().get(id.0).cloned())
            .collect();

        let mut server = DiffServer::new();
        server.start().await?;
        let session_id = server.create_session(file_path, store.language().unwrap_or_default(), original, optimized, selected);

        if let Some(url) = server.session_url(&session_id) {
            log::info!("🌐 Review the diff at {}", url);
            if config.ui.open_browser {
                if let Err(e) = webbrowser::open(&url) {
                    log::warn!("⚠️ Could not open a browser: {}", e);
                }
            }
        }

        log::info!("⏳ Waiting for apply or discard (timeout {} min)...", config.ui.diff_timeout_minutes);
        let decision = server.wait_for_decision(&session_id, config.ui.diff_timeout_minutes).await;
        server.shutdown().await?;

        decision
    }

    fn offer_save(&self, controller: &SessionController, config: &Config) -> CodeHackResult<()> {
        if !config.output.ask_to_save {
            return Ok(());
        }

        let store = controller.store();
        let Some(file_path) = store.file_path() else {
            return Ok(());
        };

        let target = Self::output_path(&config.output.output_dir, file_path);
        let input = Self::read_input(&format!("💾 Save buffer to {}? (y/N): ", target.display()))?;
        if !Self::confirmed(input.as_deref()) {
            return Ok(());
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, store.buffer())?;
        log::info!("✅ Saved {}", target.display());

        Ok(())
    }

    /// Joins the repository path under the output directory, dropping any
    /// component that could escape it.
    fn output_path(output_dir: &str, file_path: &str) -> PathBuf {
        let relative: PathBuf = Path::new(file_path)
            .components()
            .filter(|component| matches!(component, std::path::Component::Normal(_)))
            .collect();

        Path::new(output_dir).join(relative)
    }

    async fn host_command(
        &self,
        command_id: &str,
        file: &str,
        selection: Option<(usize, usize)>,
        prompt: Option<String>,
        focused: Option<bool>,
    ) -> CodeHackResult<()> {
        let config = Self::load_config()?;
        let backend = BackendClient::new(&config.backend)?;
        let mut host = ExtensionHost::new(Arc::new(backend));

        if let Some(focused) = focused {
            let (key, value) = host.set_editor_focused(focused);
            log::info!("🎯 {} = {}", key, value);
        }

        let document = std::fs::read_to_string(file)
            .map_err(|e| CodeHackError::system_error(&format!("reading {}", file), &e.to_string()))?;

        let mut context = HostContext::new(document);
        if let Some((start_line, end_line)) = selection {
            context = context.with_selection(start_line, end_line);
        }
        if let Some(prompt) = prompt {
            context = context.with_prompt(prompt);
        }

        let response = host.invoke(command_id, &context).await?;
        println!("{}", serde_json::to_string_pretty(&response)?);

        Ok(())
    }

    fn load_config() -> CodeHackResult<Config> {
        ConfigManager::load()
            .inspect_err(|_| {
                log::error!("💡 Run 'codehack init' to create a configuration file.");
            })
            .and_then(ConfigManager::ensure_valid)
    }

    fn controller(config: &Config) -> CodeHackResult<SessionController> {
        let github = GitHubClient::new(&config.github)?;
        let backend = BackendClient::new(&config.backend)?;

        Ok(SessionController::new(Arc::new(github), Arc::new(backend)).with_progress(true))
    }

    fn confirmed(input: Option<&str>) -> bool {
        input.is_some_and(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// One line from stdin; `None` once stdin is closed.
    fn read_input(message: &str) -> CodeHackResult<Option<String>> {
        print!("{}", message);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::analysis_backend::MockAnalysisBackend;
    use crate::traits::github_source::MockGitHubSource;

    fn idle_controller() -> SessionController {
        SessionController::new(Arc::new(MockGitHubSource::new()), Arc::new(MockAnalysisBackend::new()))
    }

    #[test]
    fn closed_stdin_quits_the_entry_prompt() {
        assert_eq!(CommandRunner::entry_choice(None), EntryChoice::Quit);
        assert_eq!(CommandRunner::entry_choice(Some("Q\n")), EntryChoice::Quit);
        assert_eq!(CommandRunner::entry_choice(Some(" 3\n")), EntryChoice::Open(3));
        assert_eq!(CommandRunner::entry_choice(Some("\n")), EntryChoice::Invalid(String::new()));
    }

    #[test]
    fn closed_stdin_closes_the_walker() {
        let controller = idle_controller();
        assert_eq!(CommandRunner::walker_action(&controller, None), Some(WalkerAction::Close));
        assert_eq!(CommandRunner::walker_action(&controller, Some("n\n")), Some(WalkerAction::Next));
        assert_eq!(CommandRunner::walker_action(&controller, Some("\n")), None);
    }

    #[test]
    fn closed_stdin_declines_confirmation() {
        assert!(!CommandRunner::confirmed(None));
        assert!(!CommandRunner::confirmed(Some("\n")));
        assert!(CommandRunner::confirmed(Some("YES\n")));
    }

    #[test]
    fn output_path_stays_inside_output_dir() {
        assert_eq!(CommandRunner::output_path("out", "src/a.js"), PathBuf::from("out/src/a.js"));
        assert_eq!(CommandRunner::output_path("out", "../../etc/passwd"), PathBuf::from("out/etc/passwd"));
        assert_eq!(CommandRunner::output_path("out", "/abs/b.rs"), PathBuf::from("out/abs/b.rs"));
    }
}
