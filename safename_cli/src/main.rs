use std::error::Error;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use env_logger::{Builder, Env};
use log::{error, info};

use safename_core::config::Config;
use safename_core::{disallowed_ranges, file, report, Sanitizer};

#[derive(Debug, Parser)]
#[command(name = "safename", author, version, about = "make filenames acceptable to NTFS-backed download APIs")]
struct Cli {
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count, help = "Sets the level of verbosity")]
    verbose: u8,

    #[arg(short = 'c', long = "config", global = true, help = "read sanitizer settings from a TOML file")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(name = "sanitize", about = "print the sanitized form of each [name]")]
    Sanitize {
        #[arg(required = true)]
        names: Vec<String>,
    },

    #[command(name = "check", about = "list the code points of [name] that would be replaced")]
    Check {
        name: String,
        #[arg(long = "json", action = ArgAction::SetTrue, help = "output JSON instead of a table")]
        json: bool,
    },

    #[command(
        name = "sanitize-file",
        about = "sanitize every line of [file] and write the result to [output] or stdout"
    )]
    SanitizeFile { file: String, output: Option<String> },

    #[command(name = "ranges", about = "list every code point range that gets replaced")]
    Ranges {
        #[arg(long = "json", action = ArgAction::SetTrue, help = "output JSON instead of a table")]
        json: bool,
    },
}

/// Outcome of a command that ran to completion.
#[derive(Debug, PartialEq)]
enum Status {
    Clean,
    Dirty,
}

fn load_sanitizer(config: Option<&str>) -> Result<Sanitizer, Box<dyn Error>> {
    match config {
        Some(path) => {
            info!("loading config from {}", path);
            let config = Config::new(path)?;
            Ok(Sanitizer::new(&config.sanitizer)?)
        }
        None => Ok(Sanitizer::default()),
    }
}

fn sanitize(sanitizer: &Sanitizer, names: &[String]) {
    for name in names {
        println!("{}", sanitizer.sanitize(name));
    }
}

fn check(sanitizer: &Sanitizer, name: &str, json: bool) -> Result<Status, Box<dyn Error>> {
    let violations = sanitizer.check(name);

    if json {
        println!("{}", report::violations_to_json(&violations)?);
    } else if violations.is_empty() {
        println!("{} is a valid filename", report::escape_name(sanitizer, name));
    } else {
        println!("{} -> {}", report::escape_name(sanitizer, name), sanitizer.sanitize(name));
        report::print_violations_pretty(&violations);
    }

    if violations.is_empty() {
        Ok(Status::Clean)
    } else {
        Ok(Status::Dirty)
    }
}

fn sanitize_file(sanitizer: &Sanitizer, input: &str, output: Option<&str>) -> Result<(), Box<dyn Error>> {
    let names = file::load_names_from_file(input)?;
    let sanitized: Vec<String> = names.iter().map(|name| sanitizer.sanitize(name)).collect();

    let changed = names.iter().zip(sanitized.iter()).filter(|(a, b)| a != b).count();
    info!("{} of {} names changed", changed, names.len());

    match output {
        Some(output) => file::save_names_to_file(output, &sanitized)?,
        None => {
            for name in &sanitized {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn ranges(sanitizer: &Sanitizer, json: bool) -> Result<(), Box<dyn Error>> {
    let ranges = disallowed_ranges(sanitizer);

    if json {
        println!("{}", report::ranges_to_json(&ranges)?);
    } else {
        report::print_ranges_pretty(&ranges);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<Status, Box<dyn Error>> {
    let sanitizer = load_sanitizer(cli.config.as_deref())?;

    match &cli.command {
        Commands::Sanitize { names } => {
            sanitize(&sanitizer, names);
            Ok(Status::Clean)
        }
        Commands::Check { name, json } => check(&sanitizer, name, *json),
        Commands::SanitizeFile { file, output } => {
            sanitize_file(&sanitizer, file, output.as_deref())?;
            Ok(Status::Clean)
        }
        Commands::Ranges { json } => {
            ranges(&sanitizer, *json)?;
            Ok(Status::Clean)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let min_log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(min_log_level));
    builder.init();

    match run(&cli) {
        Ok(Status::Clean) => ExitCode::SUCCESS,
        Ok(Status::Dirty) => ExitCode::FAILURE,
        Err(e) => {
            error!("an unexpected error occured ({})", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sanitize_with_config() {
        let cli = Cli::parse_from(["safename", "-c", "safename.toml", "sanitize", "CON", "a?b"]);

        assert_eq!(cli.config.as_deref(), Some("safename.toml"));
        match cli.command {
            Commands::Sanitize { names } => assert_eq!(names, vec!["CON", "a?b"]),
            _ => panic!("expected sanitize command"),
        }
    }

    #[test]
    fn parse_sanitize_requires_a_name() {
        assert!(Cli::try_parse_from(["safename", "sanitize"]).is_err());
    }

    #[test]
    fn parse_check_json() {
        let cli = Cli::parse_from(["safename", "-vv", "check", "--json", ".hidden"]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check { name, json } => {
                assert_eq!(name, ".hidden");
                assert!(json);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn parse_sanitize_file() {
        let cli = Cli::parse_from(["safename", "sanitize-file", "names.txt", "out.txt"]);

        match cli.command {
            Commands::SanitizeFile { file, output } => {
                assert_eq!(file, "names.txt");
                assert_eq!(output.as_deref(), Some("out.txt"));
            }
            _ => panic!("expected sanitize-file command"),
        }
    }

    #[test]
    fn check_status_follows_violations() {
        let sanitizer = Sanitizer::default();
        assert_eq!(check(&sanitizer, "report.txt", true).unwrap(), Status::Clean);
        assert_eq!(check(&sanitizer, "con.txt", true).unwrap(), Status::Dirty);
    }

    #[test]
    fn load_sanitizer_without_config() {
        let sanitizer = load_sanitizer(None).unwrap();
        assert_eq!(sanitizer.replacement(), '_');
    }

    #[test]
    fn load_sanitizer_missing_config() {
        assert!(load_sanitizer(Some("/nonexistent/safename.toml")).is_err());
    }
}
