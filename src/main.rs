use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use group_score::config::{load_config, validate_config};
use group_score::output;
use group_score::session::Session;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_ROSTER: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every group and the grouping as a whole (default if no subcommand)
    Score {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the survey questions with their weight and criterion
    Questions,
    /// Validate the survey file and check every student answered every question
    Check,
}

#[derive(Parser, Debug)]
#[command(name = "group-score")]
#[command(about = "Score groupings of students against a weighted survey", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Path to survey file (defaults to ~/.config/group-score/survey.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or(filter);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Score { json: false });
    let start_time = Instant::now();

    let config_path = cli.config.map(PathBuf::from);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the whole file at startup so every problem is reported at once
    if let Err(errors) = validate_config(&config) {
        eprintln!("Survey file errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let session = match Session::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let use_colors = output::should_use_colors();

    match command {
        Commands::Score { json } => {
            let report = match session.report() {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Grouping error: {}", e);
                    std::process::exit(EXIT_ROSTER);
                }
            };

            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize report: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else if cli.verbose > 0 && !report.groups.is_empty() {
                println!("{}", output::format_report_detail(&report));
                println!();
                println!("{}", output::format_report(&report, use_colors));
            } else {
                println!("{}", output::format_report(&report, use_colors));
            }
        }
        Commands::Questions => {
            println!("{}", output::format_questions(&session.survey, use_colors));
        }
        Commands::Check => {
            if !session.course.all_answered(&session.survey) {
                eprintln!("Not every student has a valid answer to every question.");
                std::process::exit(EXIT_ROSTER);
            }
            println!(
                "OK: {} questions, {} students, {} groups",
                session.survey.len(),
                session.course.len(),
                session.grouping.len()
            );
        }
    }

    info!("Finished in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_belongs_to_score() {
        let cli = Cli::try_parse_from(["group-score", "score", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Score { json: true })));

        let cli = Cli::try_parse_from(["group-score", "-v", "score"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Score { json: false })));
        assert_eq!(cli.verbose, 1);

        assert!(Cli::try_parse_from(["group-score", "questions", "--json"]).is_err());
        assert!(Cli::try_parse_from(["group-score", "check", "--json"]).is_err());
    }
}
