//! Glint CLI - resolve and inspect design-token exports
//!
//! ```text
//! glint resolve [--mode Dark]      print resolved tokens as JSON
//! glint get Light button.radius    print a single resolved value
//! glint check                      resolve and report, non-zero exit on failure
//! glint init                       write glint.toml and a starter export
//! ```

mod config;
mod project;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glint_tokens::{ResolvedTokens, TokenDocument, TokenValue};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::GlintConfig;

/// Design-token resolver
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Resolve, inspect and validate design-token exports")]
#[command(version)]
struct Cli {
    /// Config file or directory containing glint.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Token export to read (overrides the config)
    #[arg(short, long, global = true)]
    document: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print resolved tokens as JSON
    Resolve {
        /// Only print one scope (`primitives`, `theme`, or a mode name)
        #[arg(short, long)]
        mode: Option<String>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print a single resolved value
    Get {
        /// `primitives`, `theme`, or a mode name
        scope: String,

        /// Dotted token path
        path: String,
    },

    /// Resolve the export and report token counts
    Check,

    /// Write a default glint.toml and starter export
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing glint.toml
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Resolve { mode, compact } => {
            let tokens = load_tokens(&cli)?;
            let json = match mode {
                Some(scope) => {
                    let tree = tokens
                        .scope(scope)
                        .with_context(|| format!("Unknown scope `{scope}`"))?;
                    to_json(tree, *compact)?
                }
                None => to_json(&tokens, *compact)?,
            };
            println!("{json}");
        }
        Commands::Get { scope, path } => {
            let tokens = load_tokens(&cli)?;
            let value = tokens
                .lookup(scope, path)
                .with_context(|| format!("No token `{path}` in scope `{scope}`"))?;
            match value {
                TokenValue::Object(_) | TokenValue::Array(_) => {
                    println!("{}", to_json(value, false)?)
                }
                scalar => println!("{scalar}"),
            }
        }
        Commands::Check => {
            let tokens = load_tokens(&cli)?;
            report(&tokens)?;
        }
        Commands::Init { path, force } => {
            project::init_project(path, *force)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_tokens(cli: &Cli) -> Result<ResolvedTokens> {
    let (config, base) = GlintConfig::discover(cli.config.as_deref())?;
    let path = cli
        .document
        .clone()
        .unwrap_or_else(|| config.document_path(&base));

    let file = File::open(&path)
        .with_context(|| format!("Failed to open token document {}", path.display()))?;
    let doc = TokenDocument::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let tokens = config
        .assembler()
        .assemble(&doc)
        .with_context(|| format!("Failed to resolve tokens from {}", path.display()))?;

    info!("Resolved {} ({} sections)", path.display(), doc.len());
    Ok(tokens)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.context("Failed to serialize tokens")
}

fn report(tokens: &ResolvedTokens) -> Result<()> {
    let scopes = [("primitives", tokens.primitives()), ("theme", tokens.theme())]
        .into_iter()
        .chain(tokens.modes());

    for (scope, tree) in scopes {
        if let Some(path) = tree.find_placeholder() {
            anyhow::bail!("Unresolved placeholder left at `{scope}.{path}`");
        }
        println!("{scope}: {} tokens", tree.leaves().len());
    }
    println!("ok");
    Ok(())
}
