use std::fmt;
use std::str::FromStr;
use crate::errors::CodeHackError;

/// Commands the editor host can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionCommand {
    Convert,
    ConvertSelected,
    Optimize,
    Upgrade,
    Deploy,
}

impl ExtensionCommand {
    pub const ALL: [ExtensionCommand; 5] = [
        ExtensionCommand::Convert,
        ExtensionCommand::ConvertSelected,
        ExtensionCommand::Optimize,
        ExtensionCommand::Upgrade,
        ExtensionCommand::Deploy,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ExtensionCommand::Convert => "hackConvert",
            ExtensionCommand::ConvertSelected => "hackConvertSelected",
            ExtensionCommand::Optimize => "hackOptimize",
            ExtensionCommand::Upgrade => "hackUpgrade",
            ExtensionCommand::Deploy => "hackDeploy",
        }
    }

    pub fn uses_selection(&self) -> bool {
        matches!(self, ExtensionCommand::ConvertSelected)
    }
}

impl fmt::Display for ExtensionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExtensionCommand {
    type Err = CodeHackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.id() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|command| command.id()).collect();
                CodeHackError::invalid_input(s, "a registered command id", &format!("Use one of: {}", known.join(", ")))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for command in ExtensionCommand::ALL {
            assert_eq!(command.id().parse::<ExtensionCommand>().unwrap(), command);
        }
    }

    #[test]
    fn unknown_id_is_invalid_input() {
        let error = "hackFormat".parse::<ExtensionCommand>().unwrap_err();
        assert!(error.is_invalid_input());
    }
}
