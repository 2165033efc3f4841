//! Interactive prompting.

use std::sync::Arc;

use inquire::validator::{ErrorMessage, Validation};
use inquire::{CustomUserError, InquireError, Text};
use thiserror::Error;

/// Checks an answer before the prompt returns it; `Err` carries the message
/// shown to the user.
pub type Validator = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt was interrupted")]
    Interrupted,

    #[error("prompt was cancelled")]
    Canceled,

    #[error("not an interactive terminal")]
    NotTty,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<InquireError> for PromptError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationInterrupted => Self::Interrupted,
            InquireError::OperationCanceled => Self::Canceled,
            InquireError::NotTTY => Self::NotTty,
            InquireError::IO(err) => Self::Io(err),
            other => Self::Other(other.to_string()),
        }
    }
}

pub trait Prompter {
    /// Shows `message` and reads one line, re-asking while `validator`
    /// rejects the input.
    fn input(&self, message: &str, validator: Validator) -> Result<String, PromptError>;
}

/// Terminal prompter.
#[derive(Clone, Copy, Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn input(&self, message: &str, validator: Validator) -> Result<String, PromptError> {
        Text::new(message)
            .with_validator(
                move |input: &str| -> Result<Validation, CustomUserError> {
                    Ok(match validator(input) {
                        Ok(()) => Validation::Valid,
                        Err(message) => Validation::Invalid(ErrorMessage::Custom(message)),
                    })
                },
            )
            .prompt()
            .map_err(Into::into)
    }
}
