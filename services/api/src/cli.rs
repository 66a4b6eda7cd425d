use crate::commands::{
    run_quiz_build, run_quiz_score, run_ranking_export, QuizBuildArgs, QuizScoreArgs,
    RankingExportArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use bussola::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Bussola",
    about = "Serve and explore the political compass quiz from the command line",
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
    /// Sample question sets and score answer files offline
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
    /// Summarise exported participation records
    Ranking {
        #[command(subcommand)]
        command: RankingCommand,
    },
    /// Simulate a batch of participants and print results and ranking
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// Print a balanced question set
    Build(QuizBuildArgs),
    /// Classify a JSON file of answers with the local pipeline
    Score(QuizScoreArgs),
}

#[derive(Subcommand, Debug)]
enum RankingCommand {
    /// Render the ranking summary as JSON or the monthly trend as CSV
    Export(RankingExportArgs),
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
        Command::Quiz {
            command: QuizCommand::Build(args),
        } => run_quiz_build(args),
        Command::Quiz {
            command: QuizCommand::Score(args),
        } => run_quiz_score(args),
        Command::Ranking {
            command: RankingCommand::Export(args),
        } => run_ranking_export(args),
        Command::Demo(args) => run_demo(args),
    }
}
