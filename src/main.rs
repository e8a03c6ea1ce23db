use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox_interpreter as lox;

use lox::ast_printer::AstPrinter;
use lox::driver::{self, Lox, EXIT_DATA_ERROR, EXIT_USAGE};
use lox::scanner::Scanner;
use lox::session::Session;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: Option<PathBuf>,

        /// Print tokens as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints its AST
    Parse { filename: Option<PathBuf> },

    /// Runs input from a file (or stdin) as a Lox program
    Run { filename: Option<PathBuf> },

    /// Starts an interactive prompt
    Repl,
}

/// Reads a whole source file, or stdin when no file is given.
fn read_source(filename: Option<PathBuf>) -> Result<String> {
    let mut buf = String::new();

    match filename {
        Some(filename) => {
            info!("Reading file: {:?}", filename);
            let file =
                File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
            BufReader::new(file)
                .read_to_string(&mut buf)
                .context(format!("Failed to read file {:?}", filename))?;
        }
        None => {
            info!("Reading program from stdin");
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
        }
    }

    info!("Read {} bytes", buf.len());
    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("rox_interpreter::").unwrap_or(module);
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn report(lox: &mut Lox) {
    for diagnostic in lox.take_diagnostics() {
        eprintln!("{}", diagnostic);
    }
}

fn main() -> Result<()> {
    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(EXIT_USAGE);
        }
        Err(e) => e.exit(),
    };

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => {
            let source = read_source(filename)?;
            let mut tokenized = true;

            for token in Scanner::new(&source) {
                match token {
                    Ok(token) if json => {
                        println!("{}", serde_json::to_string(&token)?);
                    }
                    Ok(token) => println!("{}", token),
                    Err(e) => {
                        tokenized = false;
                        eprintln!("{}", e);
                    }
                }
            }

            if !tokenized {
                debug!("Tokenization failed, exiting with code {}", EXIT_DATA_ERROR);
                std::process::exit(EXIT_DATA_ERROR);
            }
        }

        Commands::Parse { filename } => {
            let source = read_source(filename)?;
            let mut session = Session::new();
            let statements = driver::parse(&source, &mut session);

            for diagnostic in session.take_diagnostics() {
                eprintln!("{}", diagnostic);
            }

            if session.had_error() {
                std::process::exit(EXIT_DATA_ERROR);
            }

            for stmt in &statements {
                println!("{}", AstPrinter::print_stmt(stmt));
            }
        }

        Commands::Run { filename } => {
            let source = read_source(filename)?;
            let mut lox = Lox::new();

            lox.run(&source);
            report(&mut lox);

            if let Some(code) = lox.exit_code() {
                debug!("Run failed, exiting with code {}", code);
                std::process::exit(code);
            }

            info!("Program executed successfully");
        }

        Commands::Repl => {
            let mut lox = Lox::new();
            let stdin = io::stdin();

            lox.run_prompt(stdin.lock(), &mut io::stdout(), &mut io::stderr())
                .context("Prompt I/O failed")?;
        }
    }

    Ok(())
}
