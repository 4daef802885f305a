//! cxxsema CLI
//!
//! Usage: cxxsema [input.cpp] [--syntax] [--tokens-only]
//!
//! Without an input file, source lines are read from stdin until a line
//! containing only `DONE` or the end of input.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use cxxsema::Driver;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "cxxsema")]
#[command(version = "0.1.0")]
#[command(about = "Lexical and semantic analysis for a small C++ subset", long_about = None)]
struct Args {
    /// Source file to analyze (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Print the overview of supported statement forms between the phases
    #[arg(long, default_value_t = false)]
    syntax: bool,

    /// Stop after the lexical phase
    #[arg(long, default_value_t = false)]
    tokens_only: bool,

    /// Disable colored diagnostics
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Collect lines typed at the terminal, up to `DONE`
fn read_stdin() -> io::Result<String> {
    let mut source = String::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line == "DONE" {
            break;
        }
        source.push_str(&line);
        source.push('\n');
    }
    Ok(source)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut driver = match args.input {
        Some(ref path) => match Driver::from_path(path) {
            Ok(driver) => driver,
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                return ExitCode::FAILURE;
            }
        },
        None => match read_stdin() {
            Ok(source) => Driver::new("<stdin>", source),
            Err(e) => {
                eprintln!("{}: could not read stdin: {}", "error".red().bold(), e);
                return ExitCode::FAILURE;
            }
        },
    };

    driver.set_show_syntax(args.syntax);
    driver.set_tokens_only(args.tokens_only);

    let report = driver.analyze();
    print!("{}", report);
    println!();
    println!("=============================================================================");

    for diag in driver.diagnostics(&report) {
        eprintln!("{}", diag);
    }

    let succeeded = if args.tokens_only {
        report.tokens.is_ok()
    } else {
        report.is_coherent()
    };

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
