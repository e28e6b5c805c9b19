use std::sync::Arc;
use crate::enums::request_slot::RequestSlot;
use crate::enums::store_effect::StoreEffect;
use crate::enums::walker_action::WalkerAction;
use crate::errors::{CodeHackError, CodeHackResult};
use crate::helpers::url_parser::{parse_blob_url, parse_repo_url};
use crate::logger::animated_logger::AnimatedLogger;
use crate::services::session_store::SessionStore;
use crate::structs::github::tree_entry::TreeEntry;
use crate::structs::request_ticket::RequestTicket;
use crate::traits::analysis_backend::AnalysisBackend;
use crate::traits::github_source::GitHubSource;

/// Drives the browse → view → review → optimize flow against the remote
/// services and records every outcome in the [`SessionStore`].
///
/// Each async method returns `Ok(true)` when its response was applied and
/// `Ok(false)` when it arrived for a superseded request.
pub struct SessionController {
    github: Arc<dyn GitHubSource>,
    backend: Arc<dyn AnalysisBackend>,
    store: SessionStore,
    show_progress: bool,
}

impl SessionController {
    pub fn new(github: Arc<dyn GitHubSource>, backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            github,
            backend,
            store: SessionStore::new(),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    pub fn backend(&self) -> Arc<dyn AnalysisBackend> {
        Arc::clone(&self.backend)
    }

    pub async fn load_repository(&mut self, url: &str) -> CodeHackResult<bool> {
        let repo = parse_repo_url(url)?;
        log::info!("📦 Loading repository {}", repo);

        let ticket = self.store.begin_request(RequestSlot::Tree);
        let mut progress = self.progress(ticket);
        let result = self.github.fetch_tree(&repo).await;
        Self::stop_progress(&mut progress, result.is_ok()).await;

        match result {
            Ok(entries) => Ok(self.store.receive_tree(ticket, repo, url, entries)),
            Err(error) => self.fail(ticket, error),
        }
    }

    /// Opens the tree entry at `index` and runs detection on its content.
    pub async fn open_entry(&mut self, index: usize) -> CodeHackResult<bool> {
        let entry = self.store.entry(index).cloned().ok_or_else(|| {
            CodeHackError::invalid_input(
                &(index + 1).to_string(),
                &format!("an entry number between 1 and {}", self.store.entries().len()),
                "Pick a number from the listing",
            )
        })?;

        self.open_file(&entry).await
    }

    pub async fn open_file(&mut self, entry: &TreeEntry) -> CodeHackResult<bool> {
        if !entry.is_blob() {
            return Err(CodeHackError::invalid_input(
                &entry.path,
                "a file",
                "Directories cannot be opened; pick a file inside it",
            ));
        }

        let blob = parse_blob_url(entry)?;
        log::info!("📄 Opening {}", blob.path);

        let ticket = self.store.begin_request(RequestSlot::File);
        let mut progress = self.progress(ticket);
        let result = self.github.fetch_file_content(&blob).await;
        Self::stop_progress(&mut progress, result.is_ok()).await;

        let content = match result {
            Ok(content) => content,
            Err(error) => return self.fail(ticket, error),
        };

        if !self.store.receive_file(ticket, &blob.path, content) {
            return Ok(false);
        }

        self.detect().await
    }

    /// Submits the current buffer for analysis.
    pub async fn detect(&mut self) -> CodeHackResult<bool> {
        let code = self.store.buffer().to_string();

        let ticket = self.store.begin_request(RequestSlot::Detect);
        let mut progress = self.progress(ticket);
        let result = self.backend.detect_code(&code).await;
        Self::stop_progress(&mut progress, result.is_ok()).await;

        match result {
            Ok(issues) => {
                log::info!("🔍 {} issue(s) detected", issues.len());
                Ok(self.store.receive_issues(ticket, code, issues))
            }
            Err(error) => self.fail(ticket, error),
        }
    }

    /// Applies a walker action; an `Optimize` action also performs the
    /// optimization call before returning.
    pub async fn dispatch(&mut self, action: WalkerAction) -> CodeHackResult<StoreEffect> {
        let effect = self.store.dispatch(action);

        if let StoreEffect::Optimize(request) = &effect {
            log::info!("⚙️ Optimizing with {} selected issue(s)", self.store.selection().len());

            let mut progress = self.progress(request.ticket);
            let result = self.backend.optimize_code(&request.code, &request.prompt).await;
            Self::stop_progress(&mut progress, result.is_ok()).await;

            match result {
                Ok(code) => {
                    self.store.receive_optimized(request.ticket, code);
                }
                Err(error) => {
                    self.fail(request.ticket, error)?;
                }
            }
        }

        Ok(effect)
    }

    fn fail(&mut self, ticket: RequestTicket, error: CodeHackError) -> CodeHackResult<bool> {
        if self.store.fail_request(ticket) {
            Err(error)
        } else {
            log::debug!("Ignoring failure of superseded request: {}", error.technical_details());
            Ok(false)
        }
    }

    fn progress(&self, ticket: RequestTicket) -> Option<AnimatedLogger> {
        if !self.show_progress {
            return None;
        }

        Some(AnimatedLogger::start(ticket.slot.label()))
    }

    async fn stop_progress(progress: &mut Option<AnimatedLogger>, success: bool) {
        if let Some(logger) = progress.take() {
            if success {
                logger.stop("Done").await;
            } else {
                logger.error("Failed").await;
            }
        }
    }
}
