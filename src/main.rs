use std::{
    io,
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use lox::runner::Lox;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code for a script that scanned with errors (EX_DATAERR).
const EXIT_DATA_ERROR: u8 = 65;
/// Exit code for a script that could not be read (EX_IOERR).
const EXIT_IO_ERROR: u8 = 74;

/// Scan Lox source into tokens
#[derive(Parser, Debug)]
#[command(name = "lox", version, about, long_about = None)]
struct Cli {
    /// Script to scan; starts an interactive prompt when omitted
    script: Option<PathBuf>,

    /// Print every token of a script run
    #[arg(short, long)]
    tokens: bool,
}

fn main() -> ExitCode {
    // Silent unless RUST_LOG is set.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut lox = Lox::new(cli.tokens);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.script {
        Some(path) => match lox.run_file(&path, &mut out) {
            Ok(outcome) if outcome.had_error => {
                if let Err(error) = outcome.write_exit_notice(&mut out) {
                    eprintln!("{}", error);
                }
                ExitCode::from(EXIT_DATA_ERROR)
            }
            Ok(_) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("{}", error);
                ExitCode::from(EXIT_IO_ERROR)
            }
        },
        None => {
            let stdin = io::stdin();
            match lox.run_prompt(stdin.lock(), &mut out) {
                Ok(()) => ExitCode::SUCCESS,
                Err(error) => {
                    eprintln!("{}", error);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
