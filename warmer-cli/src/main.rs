mod cli;
mod report;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use cli::{Cli, Commands, ConfigCommands, WarmArgs};
use report::ConsoleReporter;
use warmer_config::{ConfigLoader, LogLevel, WarmerConfig};
use warmer_engine::{effective_profiles, CacheClassifier, NoopProgress, ProgressSink, WarmingSession};
use warmer_http::HttpManager;
use warmer_input::{load_profiles, read_url_files};
use warmer_logging::{init_logging_from_config, init_simple_tracing};

/// Configuration plus the warnings raised while loading it
///
/// Loading happens before the subscriber exists, so warnings are held back
/// and logged once logging is up.
struct LoadedConfig {
    config: WarmerConfig,
    warnings: Vec<String>,
}

impl LoadedConfig {
    fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

/// Load configuration from file or use defaults
fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let mut warnings = Vec::new();
    let path = match config_path {
        Some(path) if !path.exists() => {
            warnings.push(format!(
                "Configuration file not found: {:?}. Using defaults.",
                path
            ));
            None
        }
        other => other,
    };

    let config = ConfigLoader::new().load(path).context(match path {
        Some(path) => format!("Failed to load configuration from {:?}", path),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    Ok(LoadedConfig { config, warnings })
}

/// Warm the URLs of every input file with every configured profile
async fn warm_command(config: &WarmerConfig, args: &WarmArgs) -> Result<()> {
    let urls = read_url_files(&args.files)?;
    if urls.is_empty() {
        bail!("No URLs found in any of the provided files");
    }

    let profiles = load_profiles(&args.profiles)?;
    let concurrency = args.threads.unwrap_or(config.engine.concurrency);
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or(config.engine.request_timeout);

    let client = HttpManager::with_config(config.http.clone().into())
        .context("Failed to build HTTP client")?;
    let classifier = CacheClassifier::from_config(&config.cache);

    let sink: Arc<dyn ProgressSink> = if args.json {
        Arc::new(NoopProgress)
    } else {
        let reporter = ConsoleReporter::new();
        reporter.announce(urls.len(), effective_profiles(&profiles).len());
        Arc::new(reporter)
    };

    let session = WarmingSession::new(Arc::new(client), classifier, sink);
    let summary = session
        .run(&urls, &profiles, concurrency, timeout)
        .await
        .context("Warming session failed")?;

    if args.json {
        let formatted =
            serde_json::to_string_pretty(&summary).context("Failed to format summary as JSON")?;
        println!("{}", formatted);
    }

    Ok(())
}

/// Handle configuration validation
fn handle_config_validate(config_file: &PathBuf) -> Result<()> {
    info!("Validating configuration file: {:?}", config_file);

    if !config_file.exists() {
        return Err(anyhow!("Configuration file not found: {:?}", config_file));
    }

    match load_config(Some(config_file)) {
        Ok(_loaded) => {
            println!("✅ Configuration file is valid");
            info!("Configuration validation passed");
            Ok(())
        }
        Err(e) => {
            println!("❌ Configuration validation failed: {:#}", e);
            error!("Configuration validation failed: {:#}", e);
            Err(e)
        }
    }
}

/// Handle configuration generation
fn handle_config_generate(output: &PathBuf, force: bool) -> Result<()> {
    info!("Generating sample configuration at: {:?}", output);

    if output.exists() && !force {
        return Err(anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            output
        ));
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    fs::write(output, WarmerConfig::generate_sample())
        .context("Failed to write configuration file")?;

    println!("✅ Sample configuration generated at: {:?}", output);
    println!(
        "🔧 Validate with: warmer config validate --config-file {:?}",
        output
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Warm(args) => {
            let mut loaded = load_config(cli.config.as_ref())?;
            if let Some(level) = &cli.log_level {
                loaded.config.logging.level =
                    level.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
            }

            let _logging = init_logging_from_config(&loaded.config.logging)?;
            info!("Cache warmer starting");
            loaded.log_warnings();
            match &cli.config {
                Some(path) if loaded.warnings.is_empty() => {
                    info!("Loaded configuration from: {:?}", path)
                }
                Some(_) => {}
                None => debug!("No configuration file specified, using environment and defaults"),
            }

            warm_command(&loaded.config, args).await
        }
        Commands::Config { config_cmd } => {
            init_simple_tracing(cli.log_level.as_deref().unwrap_or("warn"))?;

            match config_cmd {
                ConfigCommands::Validate { config_file } => handle_config_validate(config_file),
                ConfigCommands::Generate { output, force } => {
                    handle_config_generate(output, *force)
                }
            }
        }
    }
}
