//! Lint configuration.
//!
//! One YAML file, discovered next to the lint target or passed explicitly.
//! The loaded value is an immutable snapshot threaded into the runner; there
//! is no ambient mutable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rules::{RuleId, DEFAULT_MAX_BODY_STATEMENTS};

/// Config file names searched for next to the lint target.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["echocheck.yaml", ".echocheck.yaml"];

/// Starter configuration written by `echocheck init`.
pub const CONFIG_TEMPLATE: &str = "\
# echocheck configuration
#
# Ceiling on the number of body statements the duplicate-override rule
# compares. Larger methods are skipped to bound analysis cost.
max_override_body_statements: 20

rules:
  duplicate_override: true
  inefficient_unique_call: true
";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LintConfig {
    /// Ceiling on body statement counts for override comparison.
    pub max_override_body_statements: usize,
    pub rules: RuleToggles,
}

/// Per-rule enable flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleToggles {
    pub duplicate_override: bool,
    pub inefficient_unique_call: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            max_override_body_statements: DEFAULT_MAX_BODY_STATEMENTS,
            rules: RuleToggles::default(),
        }
    }
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self {
            duplicate_override: true,
            inefficient_unique_call: true,
        }
    }
}

impl LintConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: LintConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Look for a config file next to the lint target.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        for name in DEFAULT_CONFIG_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    /// Whether a rule is enabled. Parse failures are always reported.
    pub fn rule_enabled(&self, rule: RuleId) -> bool {
        match rule {
            RuleId::DuplicateOverride => self.rules.duplicate_override,
            RuleId::InefficientUniqueCall => self.rules.inefficient_unique_call,
            RuleId::ParseFailure => true,
        }
    }
}
