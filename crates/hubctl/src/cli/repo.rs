use clap::{Parser, Subcommand};
use const_format::concatcp;
use eyre::Result as EyreResult;

use crate::cli::Environment;

pub mod delete;
pub mod selector;

#[cfg(test)]
pub(crate) mod test_utils;

use delete::DeleteCommand;

pub const EXAMPLES: &str = r"
  # Delete a repository of the authenticated user
  $ hubctl repo delete myrepo

  # Delete an organization repository in a script
  $ hubctl repo delete octo-org/legacy --yes
";

#[derive(Debug, Parser)]
#[command(about = "Command for managing repositories")]
#[command(after_help = concatcp!(
    "Examples:",
    EXAMPLES
))]
pub struct RepoCommand {
    #[command(subcommand)]
    pub subcommand: RepoSubCommands,
}

#[derive(Debug, Subcommand)]
pub enum RepoSubCommands {
    #[command(alias = "rm")]
    Delete(DeleteCommand),
}

impl RepoCommand {
    pub async fn run(self, environment: &Environment) -> EyreResult<()> {
        match self.subcommand {
            RepoSubCommands::Delete(delete) => delete.run(environment).await,
        }
    }
}
