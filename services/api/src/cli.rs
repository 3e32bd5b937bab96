use crate::report::{run_compare, run_score, CompareArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use net_benefit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Net Benefit Calculator",
    about = "Score treatment benefits and harms against patient priorities",
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
    /// Score the outcome catalog under one weighting scheme
    Score(ScoreArgs),
    /// Score the outcome catalog under both weighting schemes side by side
    Compare(CompareArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Compare(args) => run_compare(args),
    }
}
