//! List command implementation

use crate::input::InputKind;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::Subcommand;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,

    /// List the ways input files can be read
    InputKinds,
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        print!("{}", self.render());
        Ok(())
    }

    fn render(&self) -> String {
        let entries: Vec<(&str, &str)> = match self {
            ListCommands::Formats => OutputFormat::ALL
                .iter()
                .map(|(format, about)| (format.as_str(), *about))
                .collect(),
            ListCommands::InputKinds => InputKind::ALL
                .iter()
                .map(|(kind, about)| (kind.as_str(), *about))
                .collect(),
        };
        entries
            .into_iter()
            .map(|(name, about)| format!("{name:<8} {about}\n"))
            .collect()
    }
}
