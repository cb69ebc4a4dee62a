//! Human-readable output formatting

use super::{Action, Report};

/// Format a report for human consumption
pub fn format(report: &Report) -> String {
    let mut output = match (report.action, report.removed) {
        (Action::Check, 0) => format!("{}: no logging calls found\n", report.path),
        (Action::Check, n) => format!("{}: {} removable logging {}\n", report.path, n, calls(n)),
        (Action::Remove, 0) => format!("{}: no logging calls to remove\n", report.path),
        (Action::Remove, n) if report.written => {
            format!("{}: removed {} logging {} (file updated)\n", report.path, n, calls(n))
        }
        (Action::Remove, n) => format!("{}: removed {} logging {}\n", report.path, n, calls(n)),
    };

    for site in &report.references {
        output.push_str(&format!(
            "  warning: {}:{}:{}: logging function passed by reference, left in place\n",
            report.path, site.line, site.column
        ));
    }

    output
}

fn calls(n: usize) -> &'static str {
    if n == 1 {
        "call"
    } else {
        "calls"
    }
}
