use crate::demo::{run_demo, run_sweep};
use crate::server;
use clap::{Args, Parser, Subcommand};
use securyflex::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SecuryFlex Platform",
    about = "Marketplace for security work: opdrachten, sollicitaties, compliance, and payouts",
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
    /// Run the ND-nummer compliance sweep once against demo data
    Sweep,
    /// Run an end-to-end CLI demo covering the opdracht lifecycle
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load demo accounts and sessions at startup
    #[arg(long)]
    pub(crate) seed: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Sweep => run_sweep(),
        Command::Demo => run_demo(),
    }
}
