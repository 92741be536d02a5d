//! # Synapse CLI
//!
//! Command-line interface for the Synapse collaboration backend.
//!
//! ## Usage
//!
//! ```bash
//! synapse serve    # Start the API server (runs migrations automatically)
//! synapse migrate  # Run database migrations
//! synapse --help   # Show help
//! ```

use clap::{Args, CommandFactory as _, Parser, Subcommand};
use error::Result;
use migration::MigratorTrait as _;

mod config;
mod server;

/// Synapse - student-project collaboration backend
#[derive(Parser, Debug)]
#[command(name = "synapse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "SYNAPSE_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "SYNAPSE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to
    #[arg(short, long, env = "SYNAPSE_PORT", default_value = "3000")]
    pub port: u16,
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Rollback the last migration
    #[arg(long)]
    rollback: bool,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    logging::init(&cli.log_level, &cli.log_format, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "Synapse CLI starting...");

    match cli.command {
        Commands::Serve(args) => {
            let db_config = config::DatabaseConfig::from_env()
                .map_err(|e| error::AppError::config(e.to_string()))?;
            server::serve(&db_config, &args).await?;
        },
        Commands::Migrate(args) => migrate(&args).await?,
        Commands::Completions(args) => completions(&args)?,
        Commands::Validate => validate()?,
    }

    logging::info!(target: "app", "Synapse CLI completed successfully");
    Ok(())
}

async fn migrate(args: &MigrateArgs) -> Result<()> {
    logging::info!(target: "migrate", rollback = %args.rollback, "Running database migrations...");

    let db_config = config::DatabaseConfig::from_env().map_err(|e| error::AppError::config(e.to_string()))?;
    let database_url = config::build_database_url(&db_config);
    let db = migration::connect_to_database(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    if args.rollback {
        migration::Migrator::down(&db, None)
            .await
            .map_err(|e| anyhow::anyhow!("Rollback failed: {}", e))?;

        logging::info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    logging::info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}

fn completions(args: &CompletionsArgs) -> Result<()> {
    clap_complete::generate(
        args.shell,
        &mut Cli::command(),
        "synapse",
        &mut std::io::stdout(),
    );
    Ok(())
}

fn validate() -> Result<()> {
    logging::info!(target: "validate", "Validating configuration...");

    let db_config = config::DatabaseConfig::from_env().map_err(|e| error::AppError::config(e.to_string()))?;
    logging::info!(target: "validate",
        host = %db_config.host,
        port = %db_config.port,
        database = %db_config.database,
        "Database configuration parsed"
    );

    let jwt_config = ::server::identity::JwtConfig::default();
    if jwt_config.secret.is_empty() {
        return Err(error::AppError::config(
            "SYNAPSE_JWT_SECRET is not set; bearer tokens cannot be verified",
        ));
    }

    logging::info!(target: "validate", "Configuration is valid");
    Ok(())
}
