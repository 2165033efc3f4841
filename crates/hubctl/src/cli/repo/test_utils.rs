//! Fakes for the collaborators of `repo` commands.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use hubctl_client::{ApiError, ClientError, RepositoryApi};
use hubctl_primitives::repo::RepositoryIdentity;

use crate::prompt::{PromptError, Prompter, Validator};

/// Error as the REST API at `https://api.github.com` reports it for `path`.
pub(crate) fn api_error(
    status_code: u16,
    path: &str,
    message: &str,
    missing_scope: Option<&str>,
) -> ApiError {
    ApiError {
        status_code,
        message: message.to_owned(),
        url: format!("https://api.github.com{path}").parse().unwrap(),
        missing_scope: missing_scope.map(str::to_owned),
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    /// `None` makes the lookup fail with 401.
    pub login: Option<String>,
    pub delete_error: Option<ApiError>,
    pub lookups: AtomicUsize,
    pub deleted: Mutex<Vec<RepositoryIdentity>>,
}

impl FakeApi {
    pub(crate) fn logged_in(login: &str) -> Self {
        Self {
            login: Some(login.to_owned()),
            ..Self::default()
        }
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub(crate) fn deleted(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap()
            .iter()
            .map(RepositoryIdentity::full_name)
            .collect()
    }
}

#[async_trait]
impl RepositoryApi for FakeApi {
    async fn current_login(&self) -> Result<String, ClientError> {
        let _ = self.lookups.fetch_add(1, Ordering::SeqCst);

        self.login
            .clone()
            .ok_or_else(|| api_error(401, "/user", "Bad credentials", None).into())
    }

    async fn delete_repository(&self, repo: &RepositoryIdentity) -> Result<(), ClientError> {
        if let Some(err) = &self.delete_error {
            return Err(err.clone().into());
        }

        self.deleted.lock().unwrap().push(repo.clone());
        Ok(())
    }
}

/// Answers every prompt with a fixed reply, recording what was asked.
#[derive(Debug, Default)]
pub(crate) struct FakePrompter {
    /// `None` simulates an interrupted prompt.
    pub answer: Option<String>,
    pub messages: Mutex<Vec<String>>,
    pub rejections: Mutex<Vec<String>>,
}

impl FakePrompter {
    pub(crate) fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_owned()),
            ..Self::default()
        }
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn rejections(&self) -> Vec<String> {
        self.rejections.lock().unwrap().clone()
    }
}

impl Prompter for FakePrompter {
    fn input(&self, message: &str, validator: Validator) -> Result<String, PromptError> {
        self.messages.lock().unwrap().push(message.to_owned());

        let answer = self.answer.clone().ok_or(PromptError::Interrupted)?;

        if let Err(rejection) = validator(&answer) {
            self.rejections.lock().unwrap().push(rejection);
        }

        Ok(answer)
    }
}
