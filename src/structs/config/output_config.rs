use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Where applied buffers are written when the user saves them.
    #[serde(default = "ConfigHelper::default_output_dir")]
    pub output_dir: String,

    #[serde(default = "ConfigHelper::default_save_prompt")]
    pub ask_to_save: bool,

    #[serde(default = "ConfigHelper::default_context_lines")]
    pub context_lines: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: ConfigHelper::default_output_dir(),
            ask_to_save: ConfigHelper::default_save_prompt(),
            context_lines: ConfigHelper::default_context_lines(),
        }
    }
}
