use crate::report::{run_classify, run_summary, ClassifyArgs, SummaryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use facility_compliance::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Facility Compliance",
    about = "Serve and query regulatory deadline status for safety inspections",
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
    /// Classify a single due date
    Classify(ClassifyArgs),
    /// Summarise an obligation CSV export per establishment
    Summary(SummaryArgs),
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
        Command::Classify(args) => run_classify(args),
        Command::Summary(args) => run_summary(args),
    }
}
