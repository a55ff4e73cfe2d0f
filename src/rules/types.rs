//! Core types for rule results.

use serde::{Deserialize, Serialize};

/// Severity levels for diagnostics.
///
/// `Advisory` findings are style suggestions, always subject to human
/// judgment; they never fail a build on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Advisory,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Advisory => write!(f, "advisory"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "advisory" => Ok(Severity::Advisory),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Identifiers for the rules that can produce diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "duplicate_override")]
    DuplicateOverride,
    #[serde(rename = "inefficient_unique_call")]
    InefficientUniqueCall,
    #[serde(rename = "parse_failure")]
    ParseFailure,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::DuplicateOverride => "duplicate_override",
            RuleId::InefficientUniqueCall => "inefficient_unique_call",
            RuleId::ParseFailure => "parse_failure",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "duplicate_override" => Some(RuleId::DuplicateOverride),
            "inefficient_unique_call" => Some(RuleId::InefficientUniqueCall),
            "parse_failure" => Some(RuleId::ParseFailure),
            _ => None,
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single located finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: RuleId,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: usize,
}

impl Diagnostic {
    /// Create a unique key for this diagnostic (for deduplication).
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.rule, self.file, self.message)
    }
}

/// Results of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files analyzed.
    pub scanned: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Number of diagnostics at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Check if there are any error-severity diagnostics.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Sort by location for deterministic output.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| (&a.file, a.line, a.rule.as_str()).cmp(&(&b.file, b.line, b.rule.as_str())));
    }
}
