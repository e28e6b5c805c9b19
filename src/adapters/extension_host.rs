use std::sync::Arc;
use crate::config::constants::{DEFAULT_CONVERT_PROMPT, EDITOR_FOCUS_CONTEXT_KEY, WEBVIEW_PANEL_ID};
use crate::enums::extension_command::ExtensionCommand;
use crate::errors::{CodeHackError, CodeHackResult};
use crate::structs::host::host_context::HostContext;
use crate::structs::host::host_response::HostResponse;
use crate::structs::issue::Issue;
use crate::traits::analysis_backend::AnalysisBackend;

/// Thin adapter between editor-host command invocations and the analysis
/// backend. Holds no session state apart from the editor focus flag.
pub struct ExtensionHost {
    backend: Arc<dyn AnalysisBackend>,
    editor_focused: bool,
}

impl ExtensionHost {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend, editor_focused: false }
    }

    pub fn command_ids(&self) -> Vec<&'static str> {
        ExtensionCommand::ALL.iter().map(|command| command.id()).collect()
    }

    pub fn panel_id(&self) -> &'static str {
        WEBVIEW_PANEL_ID
    }

    /// Updates the focus context flag and returns the key/value pair the host
    /// should publish.
    pub fn set_editor_focused(&mut self, focused: bool) -> (&'static str, bool) {
        if self.editor_focused != focused {
            log::debug!("{} = {}", EDITOR_FOCUS_CONTEXT_KEY, focused);
        }
        self.editor_focused = focused;
        (EDITOR_FOCUS_CONTEXT_KEY, focused)
    }

    pub fn editor_focused(&self) -> bool {
        self.editor_focused
    }

    pub async fn invoke(&self, command_id: &str, context: &HostContext) -> CodeHackResult<HostResponse> {
        let command: ExtensionCommand = command_id.parse()?;
        let code = Self::command_input(command, context)?;
        let prompt = context.prompt.clone().unwrap_or_default();

        log::info!("🧩 {} ({} line(s))", command, code.lines().count());

        let mut response = HostResponse {
            command: command.id().to_string(),
            panel: WEBVIEW_PANEL_ID.to_string(),
            code: String::new(),
            language_specific_notes: Vec::new(),
            potential_compatibility_issues: Vec::new(),
        };

        match command {
            ExtensionCommand::Convert | ExtensionCommand::ConvertSelected => {
                let prompt = if prompt.trim().is_empty() { DEFAULT_CONVERT_PROMPT.to_string() } else { prompt };
                let converted = self.backend.convert_code(&code, &prompt).await?;
                response.code = converted.code;
                response.language_specific_notes = converted.language_specific_notes;
                response.potential_compatibility_issues = converted.potential_compatibility_issues;
            }
            ExtensionCommand::Optimize => {
                let prompt = if prompt.trim().is_empty() { "[]".to_string() } else { prompt };
                response.code = self.backend.optimize_code(&code, &prompt).await?;
            }
            ExtensionCommand::Upgrade => {
                response.code = self.backend.upgrade_code(&code, &prompt).await?;
            }
            ExtensionCommand::Deploy => {
                response.code = self.backend.deploy_code(&code, &prompt).await?;
            }
        }

        Ok(response)
    }

    fn command_input(command: ExtensionCommand, context: &HostContext) -> CodeHackResult<String> {
        if !command.uses_selection() {
            return Ok(context.document.clone());
        }

        let (start_line, end_line) = context.selection.ok_or_else(|| {
            CodeHackError::invalid_input("no selection", "a selected line range", "Select the lines to convert first")
        })?;

        let lines: Vec<&str> = Issue::numbered_lines(&context.document, start_line, end_line)
            .into_iter()
            .map(|(_, line)| line)
            .collect();

        if lines.is_empty() {
            return Err(CodeHackError::invalid_input(
                &format!("{}-{}", start_line, end_line),
                "a line range inside the document",
                "Check the start and end lines",
            ));
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::backend::code_response::ConvertResult;
    use crate::traits::analysis_backend::MockAnalysisBackend;

    const DOCUMENT: &str = "line one\nline two\nline three";

    #[tokio::test]
    async fn convert_selected_sends_only_selected_lines() {
        let mut backend = MockAnalysisBackend::new();
        backend
            .expect_convert_code()
            .withf(|code, prompt| code == "line two\nline three" && prompt == DEFAULT_CONVERT_PROMPT)
            .times(1)
            .returning(|_, _| {
                Ok(ConvertResult {
                    code: "converted".to_string(),
                    language_specific_notes: vec!["note".to_string()],
                    potential_compatibility_issues: Vec::new(),
                })
            });

        let host = ExtensionHost::new(Arc::new(backend));
        let context = HostContext::new(DOCUMENT).with_selection(2, 3);
        let response = host.invoke("hackConvertSelected", &context).await.unwrap();

        assert_eq!(response.code, "converted");
        assert_eq!(response.panel, "codehack.panel");
        assert_eq!(response.language_specific_notes, vec!["note".to_string()]);
    }

    #[tokio::test]
    async fn convert_sends_whole_document() {
        let mut backend = MockAnalysisBackend::new();
        backend
            .expect_convert_code()
            .withf(|code, prompt| code == DOCUMENT && prompt == "to rust")
            .returning(|code, _| {
                Ok(ConvertResult {
                    code: code.to_uppercase(),
                    language_specific_notes: Vec::new(),
                    potential_compatibility_issues: Vec::new(),
                })
            });

        let host = ExtensionHost::new(Arc::new(backend));
        let context = HostContext::new(DOCUMENT).with_prompt("to rust");
        assert_eq!(host.invoke("hackConvert", &context).await.unwrap().code, DOCUMENT.to_uppercase());
    }

    #[tokio::test]
    async fn upgrade_and_deploy_reach_their_endpoints() {
        let mut backend = MockAnalysisBackend::new();
        backend.expect_upgrade_code().times(1).returning(|_, _| Ok("upgraded".to_string()));
        backend.expect_deploy_code().times(1).returning(|_, _| Ok("FROM node".to_string()));

        let host = ExtensionHost::new(Arc::new(backend));
        let context = HostContext::new(DOCUMENT);

        assert_eq!(host.invoke("hackUpgrade", &context).await.unwrap().code, "upgraded");
        assert_eq!(host.invoke("hackDeploy", &context).await.unwrap().code, "FROM node");
    }

    #[tokio::test]
    async fn optimize_without_prompt_sends_empty_issue_list() {
        let mut backend = MockAnalysisBackend::new();
        backend
            .expect_optimize_code()
            .withf(|_, prompt| prompt == "[]")
            .returning(|_, _| Ok("optimized".to_string()));

        let host = ExtensionHost::new(Arc::new(backend));
        assert_eq!(host.invoke("hackOptimize", &HostContext::new(DOCUMENT)).await.unwrap().code, "optimized");
    }

    #[tokio::test]
    async fn unknown_command_never_reaches_backend() {
        let host = ExtensionHost::new(Arc::new(MockAnalysisBackend::new()));
        let error = host.invoke("hackFormat", &HostContext::new(DOCUMENT)).await.unwrap_err();
        assert!(error.is_invalid_input());
    }

    #[tokio::test]
    async fn convert_selected_requires_a_selection() {
        let host = ExtensionHost::new(Arc::new(MockAnalysisBackend::new()));

        let missing = host.invoke("hackConvertSelected", &HostContext::new(DOCUMENT)).await;
        assert!(missing.unwrap_err().is_invalid_input());

        let outside = HostContext::new(DOCUMENT).with_selection(10, 12);
        assert!(host.invoke("hackConvertSelected", &outside).await.unwrap_err().is_invalid_input());
    }

    #[test]
    fn focus_flag_toggles() {
        let mut host = ExtensionHost::new(Arc::new(MockAnalysisBackend::new()));
        assert!(!host.editor_focused());
        assert_eq!(host.set_editor_focused(true), ("codehack.editorFocused", true));
        assert!(host.editor_focused());
        host.set_editor_focused(false);
        assert!(!host.editor_focused());
        assert_eq!(host.command_ids().len(), 5);
    }
}
