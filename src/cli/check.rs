//! Check command implementation

use crate::cli::{load_config, read_document, CheckArgs, OutputFormat};
use crate::core::error::{Error, Result};
use crate::output::{format_report, Action, Report};
use crate::strip::Engine;
use std::process::ExitCode;

/// Run the check command
pub fn run(args: CheckArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let format = OutputFormat::select(args.json, &config);
    let report = execute(&args, Engine::new(config.matcher.matcher()?))?;

    match format {
        OutputFormat::Json => println!("{}", format_report(&report, format)),
        OutputFormat::Human => eprint!("{}", format_report(&report, format)),
    }

    if report.removed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Count removable logging calls without touching the document
pub fn execute(args: &CheckArgs, engine: Engine) -> Result<Report> {
    let (name, source) = read_document(&args.path)?;
    let outcome = engine.run(&source).map_err(|source| Error::Parse {
        path: name.clone(),
        source,
    })?;

    Ok(Report {
        action: Action::Check,
        path: name,
        removed: outcome.removed,
        written: false,
        references: outcome.references,
        output: None,
    })
}
