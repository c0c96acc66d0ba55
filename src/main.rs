use std::path::PathBuf;

use invnorm::cli::{Cli, Commands, ConfigAction};
use invnorm::config::{Config, ConfigValidator};
use invnorm::error::{InvnormError, Result};
use invnorm::gateway::InferenceGateway;
use invnorm::inventory::normalize_inventory;
use invnorm::pipeline::RecordProcessor;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            output,
            anomalies,
            offline,
            temperature,
        } => {
            cmd_run(cli.config, input, output, anomalies, offline, temperature)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "invnorm=debug" } else { "invnorm=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn cmd_run(
    config_path: Option<PathBuf>,
    input: PathBuf,
    output: Option<PathBuf>,
    anomalies: Option<PathBuf>,
    offline: bool,
    temperature: Option<f32>,
) -> Result<()> {
    let mut config = load_config(config_path)?;

    if offline {
        config.llm.enabled = false;
    }
    if let Some(temperature) = temperature {
        config.llm.temperature = temperature;
        ConfigValidator::validate(&config)?;
    }

    let out_csv = output.unwrap_or_else(|| config.output.clean_csv.clone());
    let anomalies_json = anomalies.unwrap_or_else(|| config.output.anomalies_json.clone());

    let gateway = InferenceGateway::from_config(&config.llm, config.domains.clone());
    let processor = RecordProcessor::new(gateway);

    let summary = normalize_inventory(&input, &out_csv, &anomalies_json, &processor)?;

    println!("✓ Processed {} rows", summary.rows);
    println!("  Output: {}", out_csv.display());
    println!(
        "  Anomalies: {} ({} issues found)",
        anomalies_json.display(),
        summary.anomalies
    );
    println!("  Assistant calls: {}", summary.llm_calls);

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let json = serde_json::to_string_pretty(&config).map_err(|e| InvnormError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;
            println!("{}", json);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| InvnormError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::warn!(
            "Config file not found at {}, using defaults. Run 'invnorm config init' to create one.",
            path.display()
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        ConfigValidator::validate(&config)?;
        return Ok(config);
    }

    Config::load(&path)
}
