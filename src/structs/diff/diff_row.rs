use similar::ChangeTag;

/// One line of a line-level diff, numbered on the side(s) it exists on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub tag: ChangeTag,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub text: String,
}
