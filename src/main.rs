use clap::{Arg, Command};
use minibasic::repl::{self, ReplOptions};
use minibasic::runner;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();

    let matches = Command::new("minibasic")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A line-oriented interpreter for a tiny BASIC with LET and PRINT")
        .arg(
            Arg::new("file")
                .help("Source file to execute, one statement per line")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Do not print the REPL banner or prompt")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let options = ReplOptions {
        quiet: matches.get_flag("quiet"),
    };

    match matches.get_one::<String>("file") {
        Some(file_path) if !matches.get_flag("interactive") => run_file(file_path),
        _ => {
            repl::start(options);
            ExitCode::SUCCESS
        }
    }
}

/// Installs a stderr subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=minibasic=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run_file(path: &str) -> ExitCode {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return ExitCode::FAILURE;
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let filename = path.display().to_string();
            match runner::run(&source, Some(&filename)) {
                Ok(0) => ExitCode::SUCCESS,
                Ok(_) => ExitCode::FAILURE,
                Err(e) => {
                    eprintln!("Error writing output: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}
