//! MED-INTEL console entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the LLM provider selected in config
//!   6. Spawn Ctrl-C → shutdown signal watcher
//!   7. Run the console until quit, EOF or shutdown

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use med_intel::chat::{SessionController, SYSTEM_PROMPT};
use med_intel::{comms, config, error, llm, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), error::AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some(), config.log_file.as_deref())?;

    info!(
        app_name = %config.app_name,
        provider = %config.llm.provider,
        model = %config.llm.openai.model,
        log_level = %effective_log_level,
        "config loaded"
    );

    if config.llm_api_key.is_none() && config.llm.provider != "dummy" {
        warn!("OPENAI_API_KEY is not set; turns will fail until it is");
    }

    let provider = llm::providers::build(&config.llm, config.llm_api_key.clone())
        .map_err(|e| error::AppError::Config(e.to_string()))?;

    let controller = SessionController::new(SYSTEM_PROMPT, provider, config.generation);

    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
            ctrlc_token.cancel();
        }
    });

    comms::run_console(controller, shutdown).await
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: med-intel [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv              Increase logging verbosity");
                println!();
                println!("Environment:");
                println!("  OPENAI_API_KEY             API key for the OpenAI provider");
                println!("  MED_INTEL_LOG_LEVEL        Override the configured log level");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    CliArgs { log_level: logger::level_for_verbosity(verbosity), config_path }
}
