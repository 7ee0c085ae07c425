use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_evaluate, run_roster, EvaluateArgs, RosterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use drayline::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Drayline Dispatch Compliance",
    about = "Check driver eligibility for drayage jobs from the command line or over HTTP",
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
    /// Evaluate one driver/job snapshot file
    Evaluate(EvaluateArgs),
    /// Evaluate every driver in a roster CSV against one job
    Roster(RosterArgs),
    /// Evaluate built-in sample drivers and print their reports
    Demo(DemoArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Roster(args) => run_roster(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["drayline-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_roster_arguments() {
        let cli = Cli::try_parse_from([
            "drayline-api",
            "roster",
            "--roster",
            "drivers.csv",
            "--drive-hours",
            "3.5",
            "--requires-twic",
            "--as-of",
            "2025-03-14T08:00:00Z",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Roster(args)) => {
                assert_eq!(args.drive_hours, 3.5);
                assert!(args.requires_twic);
                assert!(args.as_of.is_some());
            }
            other => panic!("expected roster command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_as_of() {
        let result = Cli::try_parse_from([
            "drayline-api",
            "evaluate",
            "--input",
            "snapshot.json",
            "--as-of",
            "yesterday",
        ]);
        assert!(result.is_err());
    }
}
