//! Remove command implementation

use crate::cli::{is_stdin, load_config, read_document, OutputFormat, RemoveArgs};
use crate::core::error::{Error, Result};
use crate::output::{format_report, Action, Report};
use crate::strip::Engine;
use std::process::ExitCode;
use tracing::{info, warn};

/// Run the remove command
pub fn run(args: RemoveArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let format = OutputFormat::select(args.json, &config);
    let report = execute(&args, Engine::new(config.matcher.matcher()?))?;

    match format {
        OutputFormat::Json => println!("{}", format_report(&report, format)),
        OutputFormat::Human => {
            // Edited text owns stdout; the summary goes to stderr
            if let Some(text) = &report.output {
                print!("{}", text);
            }
            eprint!("{}", format_report(&report, format));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Strip the document and write it back when asked to
pub fn execute(args: &RemoveArgs, engine: Engine) -> Result<Report> {
    if args.write && is_stdin(&args.path) {
        return Err(Error::IoError {
            message: "--write needs a file path, not stdin".to_string(),
        });
    }

    let (name, source) = read_document(&args.path)?;
    let outcome = engine.run(&source).map_err(|source| Error::Parse {
        path: name.clone(),
        source,
    })?;

    for site in &outcome.references {
        warn!(path = %name, line = site.line, column = site.column, "Logging reference kept");
    }

    let written = args.write && outcome.changed();
    if written {
        std::fs::write(&args.path, &outcome.text).map_err(|e| Error::IoError {
            message: format!("Failed to write {}: {}", args.path.display(), e),
        })?;
    }
    info!(path = %name, removed = outcome.removed, written, "Removed logging calls");

    Ok(Report {
        action: Action::Remove,
        path: name,
        removed: outcome.removed,
        written,
        references: outcome.references,
        output: (!args.write).then_some(outcome.text),
    })
}
