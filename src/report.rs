//! Output formatting for lint results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::rules::{Diagnostic, LintResult, Severity};

/// JSON report envelope.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub advisories: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// One diagnostic in the JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonDiagnostic {
    pub rule: String,
    pub severity: String,
    pub file: String,
    pub line: usize,
    pub message: String,
}

fn diagnostic_to_json(d: &Diagnostic) -> JsonDiagnostic {
    JsonDiagnostic {
        rule: d.rule.to_string(),
        severity: d.severity.to_string(),
        file: d.file.clone(),
        line: d.line,
        message: d.message.clone(),
    }
}

/// Build the JSON report for a result.
pub fn json_report(path: &str, result: &LintResult) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: result.scanned,
        diagnostics: result.diagnostics.iter().map(diagnostic_to_json).collect(),
        advisories: result.count(Severity::Advisory),
        warnings: result.count(Severity::Warning),
        errors: result.count(Severity::Error),
    }
}

/// Write results as JSON to stdout.
pub fn write_json(path: &str, result: &LintResult) -> anyhow::Result<()> {
    let report = json_report(path, result);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Write results as colored text to stdout.
pub fn write_pretty(path: &str, result: &LintResult) {
    println!("{} {}", "echocheck".bold(), path);
    println!();

    if result.diagnostics.is_empty() {
        println!(
            "{} no findings in {} file(s)",
            "ok".green().bold(),
            result.scanned
        );
        return;
    }

    for d in &result.diagnostics {
        let severity = match d.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Advisory => "advisory".cyan().bold(),
        };
        println!(
            "{}:{}: {} [{}] {}",
            d.file, d.line, severity, d.rule, d.message
        );
    }

    println!();
    println!(
        "{} finding(s) in {} file(s): {} error(s), {} warning(s), {} advisory",
        result.diagnostics.len(),
        result.scanned,
        result.count(Severity::Error),
        result.count(Severity::Warning),
        result.count(Severity::Advisory),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleId;

    #[test]
    fn test_json_report_shape() {
        let mut result = LintResult::new();
        result.scanned = 3;
        result.add(Diagnostic {
            rule: RuleId::DuplicateOverride,
            severity: Severity::Advisory,
            message: "'greet' method can be dropped, it is identical to the parent's".to_string(),
            file: "child.php".to_string(),
            line: 6,
        });

        let report = json_report("src", &result);
        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.advisories, 1);
        assert_eq!(report.errors, 0);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].rule, "duplicate_override");
        assert_eq!(report.diagnostics[0].severity, "advisory");

        let serialized = serde_json::to_string(&report).unwrap();
        assert!(serialized.contains("\"line\":6"));
    }
}
