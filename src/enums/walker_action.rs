use crate::structs::issue::IssueId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerAction {
    Open,
    Previous,
    Next,
    Toggle(IssueId),
    Optimize,
    Apply,
    Close,
}
