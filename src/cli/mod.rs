//! CLI command definitions and handlers

pub mod check;
pub mod remove;

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

const LONG_ABOUT: &str = r#"
Strip console.log calls from a TypeScript / JavaScript / JSX document.

Side-effecting calls passed to console.log are kept:

    console.log(save(user));     ->  save(user)
    const f = () => console.log(x);  ->  const f = () => ;

Text inside strings, template literals and comments is never touched.
References such as `register(console.log)` are kept and reported.

CONFIG:
    ~/.config/unlog/config.toml (or $UNLOG_HOME/config.toml)

    [matcher]
    namespace = "console"
    methods = ["log"]

LOGGING:
    UNLOG_LOG=debug unlog remove src/app.ts
"#;

/// Strip console.log calls from source files
#[derive(Parser, Debug)]
#[command(name = "unlog")]
#[command(author, version)]
#[command(about = "Strip console.log calls from TypeScript and JavaScript")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove logging calls from one document
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),

    /// Exit with status 1 if a document contains removable logging calls
    #[command(visible_alias = "c")]
    Check(CheckArgs),
}

/// Arguments for the remove command
#[derive(Parser, Debug, Clone)]
#[command(after_help = "EXAMPLES:
    unlog remove src/app.ts            Print the edited file to stdout
    unlog remove -w src/app.ts         Rewrite the file in place
    cat app.tsx | unlog remove -       Read from stdin
    unlog remove src/app.ts --json     JSON report including the edited text")]
pub struct RemoveArgs {
    /// File to edit, or `-` for stdin
    pub path: PathBuf,

    /// Rewrite the file in place instead of printing it
    #[arg(short, long)]
    pub write: bool,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Config file (default: ~/.config/unlog/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug, Clone)]
#[command(after_help = "EXAMPLES:
    unlog check src/app.ts             Fails if console.log calls remain
    unlog check src/app.ts --json      JSON report")]
pub struct CheckArgs {
    /// File to check, or `-` for stdin
    pub path: PathBuf,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Config file (default: ~/.config/unlog/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    fn select(json_flag: bool, config: &Config) -> Self {
        if json_flag || config.output.json {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Load the explicit config file, or the default one if present
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// True when `path` means standard input
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Display name and content of the document at `path`
pub fn read_document(path: &Path) -> Result<(String, String)> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::IoError {
                message: format!("Failed to read stdin: {}", e),
            })?;
        return Ok(("<stdin>".to_string(), text));
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| Error::IoError {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;
    Ok((path.display().to_string(), text))
}
