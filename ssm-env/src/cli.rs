use anyhow::{Context, Result, bail};
use clap::Parser;
use dotenvy::dotenv;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    configs::{Configs, SsmEnvConfig, loader::parse_page_size},
    loader::PathEnvironmentLoader,
};

#[derive(Parser, Debug, Default)]
#[command(version, about = "Load AWS SSM parameters into the environment and run a command", long_about = None)]
pub struct Args {
    /// Parameter path to load (e.g., /service/prod). Overrides SSM_PARAMETER_PATH
    #[arg(long, short = 'p')]
    pub path: Option<String>,

    /// Also load parameters nested below the path
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Results per page requested from SSM (1-10)
    #[arg(long, value_parser = parse_page_size)]
    pub page_size: Option<i32>,

    /// AWS region. Overrides AWS_REGION
    #[arg(long)]
    pub region: Option<String>,

    /// AWS shared config profile. Overrides AWS_PROFILE
    #[arg(long)]
    pub profile: Option<String>,

    /// Custom SSM endpoint (e.g., a LocalStack URL)
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Command to run with the loaded environment
    #[arg(last = true)]
    pub command: Vec<String>,
}

fn setup_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // reads RUST_LOG
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init();
}

/// Applies command line overrides on top of the env-derived configuration.
pub fn merge_args(mut config: SsmEnvConfig, args: &Args) -> SsmEnvConfig {
    if let Some(path) = &args.path {
        config.loader_config.path = path.clone();
    }
    if args.recursive {
        config.loader_config.recursive = true;
    }
    if args.page_size.is_some() {
        config.loader_config.page_size = args.page_size;
    }
    if args.region.is_some() {
        config.ssm_config.region = args.region.clone();
    }
    if args.profile.is_some() {
        config.ssm_config.profile = args.profile.clone();
    }
    if args.endpoint_url.is_some() {
        config.ssm_config.endpoint_url = args.endpoint_url.clone();
    }
    config
}

/// Loads the configured path and then runs the command, returning its exit
/// code. Without a command the loaded variable names are printed instead.
pub async fn run(args: Args) -> Result<i32> {
    dotenv().ok();

    setup_logging();

    let config = SsmEnvConfig::load()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load configs: {}", e))?;
    let config = merge_args(config, &args);
    debug!("CONFIGS: {:?}", &config);

    let path = config.loader_config.path.clone();
    let applied = if path.is_empty() {
        info!("No parameter path configured, skipping SSM load");
        Vec::new()
    } else {
        let loader =
            PathEnvironmentLoader::from_config(&config.ssm_config, &config.loader_config).await?;
        loader
            .load_with_report(&path)
            .await
            .inspect_err(|e| error!("Failed to load parameters: {}", e))?
            .applied
    };

    let Some((program, program_args)) = args.command.split_first() else {
        for name in applied {
            println!("{name}");
        }
        return Ok(0);
    };

    let status = tokio::process::Command::new(program)
        .args(program_args)
        .status()
        .await
        .with_context(|| format!("Failed to run '{program}'"))?;

    match status.code() {
        Some(code) => Ok(code),
        None => bail!("'{program}' was terminated by a signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::{LoaderConfig, SsmConfig};

    #[test]
    fn test_parse_trailing_command() {
        let args = Args::parse_from([
            "ssm-env", "--path", "/app/prod", "--recursive", "--", "env", "-0",
        ]);

        assert_eq!(args.path.as_deref(), Some("/app/prod"));
        assert!(args.recursive);
        assert_eq!(args.command, vec!["env".to_string(), "-0".to_string()]);
    }

    #[test]
    fn test_page_size_is_validated() {
        assert!(Args::try_parse_from(["ssm-env", "--page-size", "11"]).is_err());
        let args = Args::try_parse_from(["ssm-env", "--page-size", "10"]).unwrap();
        assert_eq!(args.page_size, Some(10));
    }

    #[test]
    fn test_merge_args_overrides_env_config() {
        let config = SsmEnvConfig {
            ssm_config: SsmConfig {
                region: Some("ap-southeast-1".to_string()),
                profile: Some("dev".to_string()),
                endpoint_url: None,
            },
            loader_config: LoaderConfig::new("/from/env"),
        };
        let args = Args {
            path: Some("/from/cli".to_string()),
            region: Some("eu-west-1".to_string()),
            ..Default::default()
        };

        let merged = merge_args(config, &args);

        assert_eq!(merged.loader_config.path, "/from/cli");
        assert_eq!(merged.ssm_config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(merged.ssm_config.profile.as_deref(), Some("dev"));
        assert!(!merged.loader_config.recursive);
    }
}
