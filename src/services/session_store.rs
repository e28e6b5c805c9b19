use std::collections::{BTreeSet, HashMap, HashSet};
use serde_json::json;
use crate::enums::request_slot::RequestSlot;
use crate::enums::store_effect::StoreEffect;
use crate::enums::walker_action::WalkerAction;
use crate::enums::walker_state::WalkerState;
use crate::helpers::language_detector::detect_language;
use crate::structs::github::repo_ref::RepoRef;
use crate::structs::github::tree_entry::TreeEntry;
use crate::structs::issue::{Issue, IssueId};
use crate::structs::request_ticket::{OptimizeRequest, RequestTicket};

/// Single owner of the browsing session's state.
///
/// Remote calls are bracketed by [`SessionStore::begin_request`] and one of
/// the `receive_*` / [`SessionStore::fail_request`] methods. Only the latest
/// ticket issued for a slot is honoured; anything older is dropped.
#[derive(Debug, Default)]
pub struct SessionStore {
    repo: Option<RepoRef>,
    repo_url: Option<String>,
    entries: Vec<TreeEntry>,
    file_path: Option<String>,
    language: Option<&'static str>,
    buffer: String,
    snapshot: Option<String>,
    issues: Vec<Issue>,
    selection: BTreeSet<IssueId>,
    walker: WalkerState,
    optimized: Option<String>,
    next_seq: u64,
    latest: HashMap<RequestSlot, u64>,
    loading: HashSet<RequestSlot>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repo(&self) -> Option<&RepoRef> {
        self.repo.as_ref()
    }

    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&TreeEntry> {
        self.entries.get(index)
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    pub fn language(&self) -> Option<&'static str> {
        self.language
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn selection(&self) -> &BTreeSet<IssueId> {
        &self.selection
    }

    pub fn is_selected(&self, id: IssueId) -> bool {
        self.selection.contains(&id)
    }

    pub fn walker(&self) -> WalkerState {
        self.walker
    }

    pub fn optimized(&self) -> Option<&str> {
        self.optimized.as_deref()
    }

    pub fn is_loading(&self, slot: RequestSlot) -> bool {
        self.loading.contains(&slot)
    }

    pub fn current_issue(&self) -> Option<(IssueId, &Issue)> {
        match self.walker {
            WalkerState::Reviewing(index) => self.issues.get(index).map(|issue| (IssueId(index), issue)),
            _ => None,
        }
    }

    /// True when the buffer was edited after the issues were detected.
    pub fn buffer_diverged(&self) -> bool {
        self.snapshot.as_deref().is_some_and(|snapshot| snapshot != self.buffer)
    }

    /// Analysed content and its optimized counterpart, once available.
    pub fn diff_pair(&self) -> Option<(&str, &str)> {
        match (self.walker, self.snapshot.as_deref(), self.optimized.as_deref()) {
            (WalkerState::DiffReady, Some(original), Some(optimized)) => Some((original, optimized)),
            _ => None,
        }
    }

    pub fn edit_buffer(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
        if self.buffer_diverged() {
            log::debug!("Buffer diverged from the analysed snapshot");
        }
    }

    /// Reserves `slot` for a new request and supersedes every in-flight
    /// request on it and on the slots downstream of it.
    pub fn begin_request(&mut self, slot: RequestSlot) -> RequestTicket {
        let seq = self.bump_seq();
        self.latest.insert(slot, seq);
        self.loading.insert(slot);

        for downstream in slot.downstream() {
            self.supersede(*downstream);
        }

        RequestTicket { slot, seq }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.get(&ticket.slot) == Some(&ticket.seq)
    }

    /// Records a failed request. Returns false when the ticket was stale.
    pub fn fail_request(&mut self, ticket: RequestTicket) -> bool {
        if !self.finish(ticket) {
            return false;
        }

        if ticket.slot == RequestSlot::Optimize && self.walker == WalkerState::Optimizing {
            self.walker = self.last_review_state();
        }
        true
    }

    pub fn receive_tree(&mut self, ticket: RequestTicket, repo: RepoRef, url: &str, entries: Vec<TreeEntry>) -> bool {
        if !self.finish(ticket) {
            return false;
        }

        log::debug!("Loaded {} tree entries for {}", entries.len(), repo);
        self.repo = Some(repo);
        self.repo_url = Some(url.trim().to_string());
        self.entries = entries;
        self.reset_file();
        true
    }

    pub fn receive_file(&mut self, ticket: RequestTicket, path: &str, content: String) -> bool {
        if !self.finish(ticket) {
            return false;
        }

        self.reset_file();
        self.file_path = Some(path.to_string());
        self.language = Some(detect_language(path));
        self.buffer = content;
        true
    }

    /// Stores a detection result. `analysed` is the exact content that was
    /// submitted; issue line ranges refer to it from now on.
    pub fn receive_issues(&mut self, ticket: RequestTicket, analysed: String, issues: Vec<Issue>) -> bool {
        if !self.finish(ticket) {
            return false;
        }

        self.snapshot = Some(analysed);
        self.issues = issues;
        self.selection.clear();
        self.optimized = None;
        self.walker = if self.issues.is_empty() {
            WalkerState::Closed
        } else {
            WalkerState::Reviewing(0)
        };
        true
    }

    pub fn receive_optimized(&mut self, ticket: RequestTicket, code: String) -> bool {
        if self.walker != WalkerState::Optimizing || !self.finish(ticket) {
            return false;
        }

        self.optimized = Some(code);
        self.walker = WalkerState::DiffReady;
        true
    }

    pub fn dispatch(&mut self, action: WalkerAction) -> StoreEffect {
        let count = self.issues.len();

        match (action, self.walker) {
            (WalkerAction::Open, WalkerState::Closed) if count > 0 => {
                self.walker = WalkerState::Reviewing(0);
                StoreEffect::Updated
            }
            (WalkerAction::Previous, WalkerState::Reviewing(index)) if index > 0 => {
                self.walker = WalkerState::Reviewing(index - 1);
                StoreEffect::Updated
            }
            (WalkerAction::Next, WalkerState::Reviewing(index)) if index + 1 < count => {
                self.walker = WalkerState::Reviewing(index + 1);
                StoreEffect::Updated
            }
            (WalkerAction::Toggle(id), WalkerState::Reviewing(_)) if id.0 < count => {
                if !self.selection.remove(&id) {
                    self.selection.insert(id);
                }
                StoreEffect::Updated
            }
            (WalkerAction::Optimize, WalkerState::Reviewing(index)) if index + 1 == count => {
                self.start_optimize()
            }
            (WalkerAction::Apply, WalkerState::DiffReady) => {
                match self.optimized.clone() {
                    Some(optimized) => {
                        if self.buffer_diverged() {
                            log::warn!("⚠️ Overwriting buffer edits made after detection");
                        }
                        self.buffer = optimized;
                        self.walker = WalkerState::Closed;
                        StoreEffect::Updated
                    }
                    None => StoreEffect::Ignored,
                }
            }
            (WalkerAction::Close, WalkerState::Reviewing(_)) => {
                self.walker = WalkerState::Closed;
                StoreEffect::Updated
            }
            (WalkerAction::Close, WalkerState::Optimizing) => {
                self.supersede(RequestSlot::Optimize);
                self.walker = WalkerState::Closed;
                StoreEffect::Updated
            }
            (WalkerAction::Close, WalkerState::DiffReady) => {
                self.optimized = None;
                self.walker = WalkerState::Closed;
                StoreEffect::Updated
            }
            _ => StoreEffect::Ignored,
        }
    }

    /// Selected issues in list order, serialized as the optimize prompt.
    pub fn selection_prompt(&self) -> String {
        let selected: Vec<serde_json::Value> = self
            .selection
            .iter()
            .filter_map(|id| self.issues.get(id.0))
            .map(|issue| {
                json!({
                    "start_line": issue.start_line,
                    "end_line": issue.end_line,
                    "tag": issue.tag,
                    "description": issue.description,
                })
            })
            .collect();

        serde_json::Value::Array(selected).to_string()
    }

    fn start_optimize(&mut self) -> StoreEffect {
        let code = self.snapshot.clone().unwrap_or_else(|| self.buffer.clone());
        let prompt = self.selection_prompt();
        let ticket = self.begin_request(RequestSlot::Optimize);
        self.walker = WalkerState::Optimizing;

        StoreEffect::Optimize(OptimizeRequest { ticket, code, prompt })
    }

    fn last_review_state(&self) -> WalkerState {
        match self.issues.len() {
            0 => WalkerState::Closed,
            count => WalkerState::Reviewing(count - 1),
        }
    }

    fn finish(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(&ticket) {
            log::debug!("Discarding stale {:?} response #{}", ticket.slot, ticket.seq);
            return false;
        }

        self.loading.remove(&ticket.slot);
        true
    }

    fn supersede(&mut self, slot: RequestSlot) {
        if self.loading.remove(&slot) {
            log::debug!("Superseded in-flight {:?} request", slot);
        }
        let seq = self.bump_seq();
        self.latest.insert(slot, seq);
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn reset_file(&mut self) {
        self.file_path = None;
        self.language = None;
        self.buffer.clear();
        self.snapshot = None;
        self.issues.clear();
        self.selection.clear();
        self.optimized = None;
        self.walker = WalkerState::Closed;
    }
}
