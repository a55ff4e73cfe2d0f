//! Rule runner orchestrating analysis over a set of files.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::analysis::{DeclarationIndex, FileModel, PhpAnalyzer, ProjectModel};
use crate::config::LintConfig;

use super::{
    check_override_redundancy, check_unique_filter_calls, Diagnostic, LintResult, RuleId, Severity,
};

/// Executes all enabled rules against a set of files.
///
/// Files are parsed and lowered in parallel; the rule passes run over the
/// immutable project model afterwards, once the cross-file declaration
/// index exists.
pub struct Runner {
    config: LintConfig,
}

impl Runner {
    /// Create a runner with the given configuration snapshot.
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    /// Run all enabled rules. Unreadable or unparseable files become
    /// diagnostics, not errors; the run always completes.
    pub fn run(&self, files: &[PathBuf]) -> anyhow::Result<LintResult> {
        let models: Vec<FileModel> = files
            .par_iter()
            .enumerate()
            .map(|(id, path)| {
                // tree_sitter::Parser is not Sync; build one per task.
                let analyzer = PhpAnalyzer::new();
                let display = path.to_string_lossy().to_string();
                match std::fs::read(path) {
                    Ok(source) => match analyzer.parse(path, &source) {
                        Ok(parsed) => analyzer.lower(&parsed, id),
                        Err(e) => FileModel::failed(display, e.to_string()),
                    },
                    Err(e) => FileModel::failed(display, e.to_string()),
                }
            })
            .collect();

        let project = ProjectModel { files: models };
        let index = DeclarationIndex::build(&project);

        let mut result = LintResult::new();
        result.scanned = project.files.len();

        for file in &project.files {
            if let Some(error) = &file.parse_error {
                result.add(Diagnostic {
                    rule: RuleId::ParseFailure,
                    severity: Severity::Error,
                    message: error.clone(),
                    file: file.path.clone(),
                    line: 1,
                });
            }

            if self.config.rule_enabled(RuleId::DuplicateOverride) {
                for class in &file.classes {
                    for method in &class.methods {
                        if let Some(diagnostic) = check_override_redundancy(
                            method,
                            class,
                            &index,
                            &index,
                            self.config.max_override_body_statements,
                            &file.path,
                        ) {
                            result.add(diagnostic);
                        }
                    }
                }
            }

            if self.config.rule_enabled(RuleId::InefficientUniqueCall) {
                result.extend(check_unique_filter_calls(&file.top_level, &file.path));
                for function in &file.functions {
                    result.extend(check_unique_filter_calls(&function.body, &file.path));
                }
                for class in &file.classes {
                    for method in &class.methods {
                        if let Some(body) = &method.body {
                            result.extend(check_unique_filter_calls(body, &file.path));
                        }
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_runner_reports_duplicate_override() {
        let temp = TempDir::new().unwrap();
        let base = write(
            &temp,
            "base.php",
            r#"<?php
namespace App;

class Base
{
    public function greet($name)
    {
        return trim($name);
    }
}
"#,
        );
        let child = write(
            &temp,
            "child.php",
            r#"<?php
namespace App;

class Child extends Base
{
    public function greet($name)
    {
        return trim($name);
    }
}
"#,
        );

        let runner = Runner::new(LintConfig::default());
        let result = runner.run(&[base, child]).unwrap();
        assert_eq!(result.scanned, 2);
        let findings: Vec<_> = result
            .diagnostics
            .iter()
            .filter(|d| d.rule == RuleId::DuplicateOverride)
            .collect();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].file.ends_with("child.php"));
        assert!(findings[0].message.contains("greet"));
    }

    #[test]
    fn test_runner_respects_alias_divergence() {
        let temp = TempDir::new().unwrap();
        let base = write(
            &temp,
            "base.php",
            r#"<?php
namespace App;

use LibA\Helper;

class Base
{
    public function make()
    {
        return new Helper();
    }
}
"#,
        );
        let child = write(
            &temp,
            "child.php",
            r#"<?php
namespace App;

use LibB\Helper;

class Child extends Base
{
    public function make()
    {
        return new Helper();
    }
}
"#,
        );

        let runner = Runner::new(LintConfig::default());
        let result = runner.run(&[base, child]).unwrap();
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.rule != RuleId::DuplicateOverride));
    }

    #[test]
    fn test_runner_reports_unique_filter_everywhere() {
        let temp = TempDir::new().unwrap();
        let file = write(
            &temp,
            "uniq.php",
            r#"<?php

function distinct_count($items)
{
    return count(array_unique($items));
}

$kept = array_values(array_unique($items));
$plain = array_unique($items);
"#,
        );

        let runner = Runner::new(LintConfig::default());
        let result = runner.run(&[file]).unwrap();
        let findings: Vec<_> = result
            .diagnostics
            .iter()
            .filter(|d| d.rule == RuleId::InefficientUniqueCall)
            .collect();
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_runner_flags_parse_failures() {
        let temp = TempDir::new().unwrap();
        let file = write(&temp, "broken.php", "<?php class {");

        let runner = Runner::new(LintConfig::default());
        let result = runner.run(&[file]).unwrap();
        assert!(result.has_errors());
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.rule == RuleId::ParseFailure));
    }

    #[test]
    fn test_runner_disabled_rules_stay_silent() {
        let temp = TempDir::new().unwrap();
        let file = write(&temp, "uniq.php", "<?php\n$n = count(array_unique($a));\n");

        let mut config = LintConfig::default();
        config.rules.inefficient_unique_call = false;
        let runner = Runner::new(config);
        let result = runner.run(&[file]).unwrap();
        assert!(result.diagnostics.is_empty());
    }
}
