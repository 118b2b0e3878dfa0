use anyhow::{Context, Result};
use clap::Parser;
use roommates_cli::{
    commands::{execute, Command, OutputFormat},
    config::Config,
    setup::{create_repositories, ensure_database_directory_from_config},
    telemetry::{init_telemetry, log_startup_info, report_error},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "roommates")]
#[command(about = "Rooms and roommates stored in SQLite")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database URL override
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_file) => Config::from_file(config_file)?,
        None => Config::from_env()?,
    };

    if let Some(ref database_url) = cli.database_url {
        config.database.url = database_url.clone();
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    config.validate().context("Configuration validation failed")?;
    log_startup_info(&config);

    ensure_database_directory_from_config(&config)
        .context("Failed to create database directory")?;

    let repositories = create_repositories(&config)
        .await
        .context("Failed to initialize database")?;

    let command = cli.command.unwrap_or(Command::Demo);
    info!(?command, "Running command");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(
        &command,
        &repositories.rooms,
        &repositories.roommates,
        cli.format,
        &mut out,
    )
    .await
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        report_error(&e, "roommates");
        error!(error = %e, "Exiting with failure");
        eprintln!("Error: {e:#}");
        std::process::exit(roommates_cli::exit_code(&e));
    }
}
