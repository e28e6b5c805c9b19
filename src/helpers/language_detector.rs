use std::path::Path;
use crate::config::constants::{DEFAULT_FILE_TYPE, SUPPORTED_FILE_EXTENSIONS};

/// Display language for a file, derived from its extension only.
pub fn detect_language(file_path: &str) -> &'static str {
    let file_name = Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    if file_name == "Dockerfile" {
        return "docker";
    }

    Path::new(file_path)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase())
        .and_then(|extension| {
            SUPPORTED_FILE_EXTENSIONS
                .iter()
                .find(|(ext, _)| *ext == extension)
                .map(|(_, language)| *language)
        })
        .unwrap_or(DEFAULT_FILE_TYPE)
}
