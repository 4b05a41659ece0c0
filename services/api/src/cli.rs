use clap::{Args, Parser, Subcommand};
use recruitment::error::AppError;

use crate::infra::build_store;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Recruitment API",
    about = "Run the candidate intake HTTP service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Insert job offers so candidates have something to apply to
    Seed(SeedArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured SQLite database path
    #[arg(long)]
    pub(crate) database: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct SeedArgs {
    /// Override the configured SQLite database path
    #[arg(long)]
    pub(crate) database: Option<String>,
    /// Job offer titles to insert, one row each
    #[arg(required = true)]
    pub(crate) titles: Vec<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Seed(args) => seed(args).await,
    }
}

async fn seed(args: SeedArgs) -> Result<(), AppError> {
    let mut config = recruitment::config::AppConfig::load()?;
    if let Some(database) = args.database {
        config.database.path = database;
    }

    let store = build_store(&config)?;
    for title in &args.titles {
        let id = store.add_job_offer(title).await?;
        println!("job offer {id}: {title}");
    }
    Ok(())
}
