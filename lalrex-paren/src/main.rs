//! Command-line interface for lalrex-paren.
//!
//! `parse` reads one parenthesized term from a file or from the command
//! line, prints the tree on stdout and every syntax error on stderr.
//! `tables` dumps the packed parse tables.

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand};
use lalrex::ParserConfig;
use lalrex_paren::{ParenParser, grammar};
use std::io::Write;
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a term
    Parse {
        /// Input file
        #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
        input: Option<PathBuf>,

        /// Term given inline
        #[arg(short, long)]
        text: Option<String>,

        /// Maximum parse stack depth
        #[arg(long, default_value_t = ParserConfig::default().max_depth)]
        max_depth: usize,

        /// Syntax errors tolerated before giving up
        #[arg(long, default_value_t = ParserConfig::default().max_errors)]
        max_errors: usize,

        /// Report bare `syntax error` messages
        #[arg(long)]
        terse: bool,
    },
    /// Dumps the parse tables
    Tables,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Parse {
            input,
            text,
            max_depth,
            max_errors,
            terse,
        } => {
            let bytes = match (input, text) {
                (Some(path), _) => std::fs::read(&path)
                    .with_context(|| format!("can't read {:?}", path))?,
                (None, Some(text)) => text.into_bytes(),
                (None, None) => anyhow::bail!("either --input or --text is required"),
            };
            let config = ParserConfig::default()
                .with_max_depth(max_depth)
                .with_max_errors(max_errors)
                .with_verbose_errors(!terse);
            let mut parser = ParenParser::try_new(bytes.into_iter())?.with_config(config);
            match parser.parse() {
                Ok((tree, diagnostics)) => {
                    for d in &diagnostics {
                        eprintln!("{}", d);
                    }
                    println!("{}", tree);
                    log::info!("{:?}", parser.stats());
                    if !diagnostics.is_empty() {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    for d in parser.diagnostics() {
                        eprintln!("{}", d);
                    }
                    return Err(e).context("parse failed");
                }
            }
        }
        Commands::Tables => {
            let tables = grammar::tables()?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            tables.write_tables(&mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}
