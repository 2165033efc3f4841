use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use const_format::concatcp;
use eyre::{Report as EyreReport, Result as EyreResult};
use hubctl_client::host::{normalize_hostname, rest_base_url, DEFAULT_HOST};
use hubctl_client::{Client, ConnectionInfo};
use thiserror::Error as ThisError;
use url::Url;

use crate::config::Config;
use crate::defaults;
use crate::output::{ErrorLine, Output, Terminal};
use crate::storage::{ConfigTokenStorage, EnvTokens};

pub mod repo;

use repo::delete::DeleteError;
use repo::RepoCommand;

pub const EXAMPLES: &str = r"
  # Delete a repository owned by the authenticated user
  $ hubctl repo delete myrepo

  # Delete a repository without the confirmation prompt
  $ hubctl repo delete octo-org/legacy --yes
";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = concatcp!(
    "Environment variables:\n",
    "  HUBCTL_TOKEN            Token for the selected host\n",
    "  GH_TOKEN, GITHUB_TOKEN  Token for github.com\n",
    "  HUBCTL_FORCE_TTY        Treat stdout as a terminal\n",
    "  HUBCTL_PROMPT_DISABLED  Never prompt\n",
    "  NO_COLOR                Disable colored output\n\n",
    "Examples:",
    EXAMPLES
))]
pub struct RootCommand {
    #[command(flatten)]
    pub args: RootArgs,

    #[command(subcommand)]
    pub action: SubCommands,
}

#[derive(Debug, Subcommand)]
pub enum SubCommands {
    Repo(RepoCommand),
}

#[derive(Debug, Parser)]
pub struct RootArgs {
    /// Directory holding hosts.toml
    #[arg(long, value_name = "PATH", default_value_t = defaults::default_config_dir())]
    #[arg(env = "HUBCTL_CONFIG_DIR", hide_env_values = true)]
    pub config_dir: Utf8PathBuf,

    /// Host to operate on
    #[arg(long, value_name = "HOST", default_value = DEFAULT_HOST)]
    #[arg(env = "HUBCTL_HOST")]
    pub hostname: String,

    /// REST API base URL, overriding the one derived from the host
    #[arg(long, value_name = "URL")]
    #[arg(env = "HUBCTL_API_URL")]
    pub api: Option<Url>,
}

#[derive(Debug)]
pub struct Environment {
    pub output: Output,
    pub terminal: Terminal,
    config_dir: Utf8PathBuf,
    hostname: String,
    api: Option<Url>,
}

impl Environment {
    pub fn new(output: Output, terminal: Terminal, args: RootArgs) -> Self {
        Self {
            output,
            terminal,
            config_dir: args.config_dir,
            hostname: args.hostname,
            api: args.api,
        }
    }

    /// Authenticated client for the selected host.
    pub async fn client(&self) -> EyreResult<Client> {
        let host = normalize_hostname(&self.hostname);
        let config = Config::load(&self.config_dir).await?;
        let storage = ConfigTokenStorage::new(config, EnvTokens::from_env());

        let api_url = match (&self.api, storage.host(&host).and_then(|h| h.api_url.clone())) {
            (Some(api), _) => api.clone(),
            (None, Some(api)) => api,
            (None, None) => rest_base_url(&host)?,
        };

        let connection = ConnectionInfo::from_storage(api_url, &host, &storage).await?;

        Ok(Client::new(connection))
    }
}

impl RootCommand {
    pub async fn run(self) -> Result<(), CliError> {
        let terminal = Terminal::detect();
        let environment = Environment::new(Output::stdio(terminal), terminal, self.args);

        let result = match self.action {
            SubCommands::Repo(repo) => repo.run(&environment).await,
        };

        if let Err(err) = result {
            let err = match err.downcast::<DeleteError>() {
                Ok(err) => CliError::Delete(err),
                Err(err) => CliError::Other(err),
            };

            environment.output.write_error(&ErrorLine(&err));
            return Err(err);
        }

        Ok(())
    }
}

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error(transparent)]
    Delete(#[from] DeleteError),

    #[error("{0:#}")]
    Other(EyreReport),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Delete(err) => err.exit_code(),
            Self::Other(_) => 1,
        }
    }
}

impl From<CliError> for ExitCode {
    fn from(error: CliError) -> Self {
        Self::from(error.exit_code())
    }
}
