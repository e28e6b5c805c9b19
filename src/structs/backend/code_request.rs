use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DetectRequest<'a> {
    pub code: &'a str,
}

/// Body shared by the optimize, convert, upgrade and deploy endpoints.
#[derive(Debug, Serialize)]
pub struct CodePromptRequest<'a> {
    pub code: &'a str,
    pub prompt: &'a str,
}
