use std::io::Write;
use std::path::PathBuf;

use agentmon_config::{
    default_config, ConfigProvider, FileProvider, MonitoringConfig, DEFAULT_ENV_PREFIX,
};
use agentmon_telemetry::logging::EventLogger;
use clap::{Args, Parser, Subcommand};

use crate::error::CliError;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the built-in default settings
    Defaults,
    /// Decode a config file and print the effective settings
    Show(ConfigArgs),
    /// Decode a config file and report whether it is valid
    Check(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// YAML file with the monitoring settings
    #[arg(short, long)]
    pub config: PathBuf,
    /// Prefix of environment variables that override the file
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    pub env_prefix: String,
}

impl ConfigArgs {
    fn provider(&self) -> FileProvider {
        FileProvider::new(&self.config).with_env_prefix(&self.env_prefix)
    }
}

pub fn run_command<W: Write>(cli: Cli, out: &mut W) -> Result<(), CliError> {
    match cli.command {
        Commands::Defaults => {
            write!(out, "{}", render(&default_config())?)?;
        }
        Commands::Show(args) => {
            let config = decode(&args.provider())?;
            write!(out, "{}", render(&config)?)?;
        }
        Commands::Check(args) => {
            decode(&args.provider())?;
            writeln!(out, "{}: ok", args.config.display())?;
        }
    }
    Ok(())
}

fn decode<P: ConfigProvider>(provider: &P) -> Result<MonitoringConfig, CliError> {
    let config = default_config().decode(provider).map_err(|e| {
        tracing::error!(error = %e, "Failed to decode monitoring config");
        e
    })?;

    let provenance = if config.http.enabled_is_set {
        "explicit"
    } else {
        "inherited"
    };
    EventLogger::log_event(
        "http_enabled",
        &format!("enabled={} ({})", config.http.enabled, provenance),
    );
    Ok(config)
}

/// YAML view of the settings with APM credentials masked.
fn render(config: &MonitoringConfig) -> Result<String, CliError> {
    let printable = MonitoringConfig {
        apm: config.apm.redacted(),
        ..config.clone()
    };
    Ok(serde_yaml::to_string(&printable)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn run(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        let mut out = Vec::new();
        run_command(cli, &mut out)?;
        Ok(String::from_utf8(out).expect("output is utf-8"))
    }

    #[test]
    fn defaults_are_printed() {
        let out = run(&["agentmon", "defaults"]).unwrap();
        assert!(out.contains("namespace: default"));
        assert!(out.contains("port: 6791"));
        assert!(!out.contains("enabled_is_set"));
    }

    #[test]
    fn show_masks_credentials() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "agent.yml",
                "apm:\n  api_key: s3cret\n  environment: prod\nhttp:\n  enabled: true\n",
            )?;

            let out = run(&["agentmon", "show", "--config", "agent.yml"]).expect("show succeeds");
            assert!(out.contains("[redacted]"));
            assert!(!out.contains("s3cret"));
            assert!(out.contains("environment: prod"));
            Ok(())
        });
    }

    #[test]
    fn check_honors_custom_env_prefix() {
        Jail::expect_with(|jail| {
            jail.create_file("agent.yml", "namespace: edge\n")?;
            jail.set_env("MON_HTTP__PORT", "99999");

            let err = run(&["agentmon", "check", "-c", "agent.yml", "--env-prefix", "MON_"])
                .unwrap_err();
            assert!(matches!(err, CliError::Config(_)));

            let out = run(&["agentmon", "check", "-c", "agent.yml"]).expect("default prefix ignores MON_");
            assert!(out.contains("agent.yml: ok"));
            Ok(())
        });
    }
}
