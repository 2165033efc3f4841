use std::sync::Arc;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use eyre::Result as EyreResult;
use hubctl_client::{ClientError, RepositoryApi};
use hubctl_primitives::repo::{InvalidRepository, RepositoryIdentity};
use thiserror::Error;
use tracing::debug;

use crate::cli::repo::selector;
use crate::cli::Environment;
use crate::output::{Output, SuccessLine};
use crate::prompt::{InquirePrompter, PromptError, Prompter, Validator};

#[derive(Clone, Debug, Parser)]
#[command(about = "Delete a repository")]
#[command(long_about = "Delete a repository.\n\n\
    Deletion is irreversible and requires a token with the \"delete_repo\" scope.")]
pub struct DeleteCommand {
    /// Repository to delete, as NAME or OWNER/NAME
    #[arg(value_name = "REPOSITORY", value_parser = NonEmptyStringValueParser::new())]
    pub repository: Option<String>,

    /// Confirm deletion without prompting
    #[arg(long, visible_alias = "confirm")]
    pub yes: bool,
}

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("cannot delete: repository argument required")]
    MissingRepository,

    #[error("argument error: {0}")]
    InvalidIdentifier(#[from] InvalidRepository),

    #[error("{0}")]
    IdentityResolutionFailed(#[source] ClientError),

    #[error("could not prompt: confirmation with prompt or --yes flag required")]
    PromptUnavailable,

    #[error("You entered {0}")]
    ConfirmationMismatch(String),

    #[error("could not prompt: {0}")]
    PromptFailed(#[source] PromptError),

    #[error("{0}")]
    DeleteFailed(#[source] ClientError),
}

impl DeleteError {
    /// `2` for usage errors, `101` when the host rejected a request, `1`
    /// otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingRepository | Self::InvalidIdentifier(_) | Self::PromptUnavailable => 2,
            Self::IdentityResolutionFailed(err) | Self::DeleteFailed(err)
                if err.api_error().is_some() =>
            {
                101
            }
            _ => 1,
        }
    }
}

impl DeleteCommand {
    pub async fn run(self, environment: &Environment) -> EyreResult<()> {
        let repository = self.repository.ok_or(DeleteError::MissingRepository)?;

        if !self.yes && !environment.terminal.can_prompt() {
            return Err(DeleteError::PromptUnavailable.into());
        }

        let client = environment.client().await?;

        let _deleted = delete_repository(
            &client,
            &InquirePrompter,
            &environment.output,
            &repository,
            self.yes,
        )
        .await?;

        Ok(())
    }
}

/// Resolves `selector`, obtains consent unless `confirmed`, and deletes the
/// repository.
///
/// The success line is written only when stdout is a terminal.
pub async fn delete_repository<A, P>(
    api: &A,
    prompter: &P,
    output: &Output,
    selector: &str,
    confirmed: bool,
) -> Result<RepositoryIdentity, DeleteError>
where
    A: RepositoryApi + ?Sized,
    P: Prompter + ?Sized,
{
    let repo = selector::resolve(selector, api).await?;

    if confirmed {
        debug!(repository = %repo, "Deletion confirmed by flag");
    } else {
        confirm(&repo, prompter)?;
    }

    api.delete_repository(&repo)
        .await
        .map_err(DeleteError::DeleteFailed)?;

    if output.is_stdout_tty() {
        output.write(&SuccessLine(&format!("Deleted repository {repo}")));
    }

    Ok(repo)
}

fn confirm<P: Prompter + ?Sized>(repo: &RepositoryIdentity, prompter: &P) -> Result<(), DeleteError> {
    let expected = repo.clone();
    let validator: Validator = Arc::new(move |input: &str| {
        if expected.matches_confirmation(input) {
            Ok(())
        } else {
            Err(format!("You entered {input}"))
        }
    });

    let answer = prompter
        .input(&format!("Type {repo} to confirm deletion:"), validator)
        .map_err(DeleteError::PromptFailed)?;

    if !repo.matches_confirmation(&answer) {
        return Err(DeleteError::ConfirmationMismatch(answer));
    }

    Ok(())
}
