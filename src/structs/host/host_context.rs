/// What the host hands over with a command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    pub document: String,
    /// 1-based inclusive line range of the editor selection.
    pub selection: Option<(usize, usize)>,
    pub prompt: Option<String>,
}

impl HostContext {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, start_line: usize, end_line: usize) -> Self {
        self.selection = Some((start_line, end_line));
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}
