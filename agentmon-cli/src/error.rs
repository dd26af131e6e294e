use agentmon_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
