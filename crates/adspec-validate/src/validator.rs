use adspec_core::{AdSpec, Severity, ValidationResult};

use crate::error::ValidateError;
use crate::file::CreativeFile;
use crate::probe::{ImageProbe, RasterProbe};
use crate::rule::{DimensionRule, FormatRule, Rule, SizeRule, ValidateInput};

/// Runs the format, size and dimension rules in that order and folds their
/// findings into one report.
pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::with_probe(RasterProbe)
    }

    pub fn with_probe<P: ImageProbe + 'static>(probe: P) -> Self {
        Self {
            rules: vec![Box::new(FormatRule), Box::new(SizeRule), Box::new(DimensionRule::new(probe))],
        }
    }

    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Errors only when the creative's bytes cannot be read; every other
    /// problem is reported as a message in the result.
    pub fn validate(&self, file: &CreativeFile, spec: &AdSpec) -> Result<ValidationResult, ValidateError> {
        let input = ValidateInput { file, spec };
        let mut messages = Vec::new();
        for rule in &self.rules {
            let findings = rule.eval(&input)?;
            tracing::debug!(
                rule = rule.id(),
                spec = %spec.id,
                findings = findings.len(),
                failed = findings.iter().any(|f| f.severity == Severity::Error),
                "rule evaluated"
            );
            messages.extend(findings.into_iter().map(|f| f.into_message()));
        }
        let result = ValidationResult::from_messages(messages);
        tracing::info!(file = file.name(), spec = %spec.id, valid = result.is_valid, "creative validated");
        Ok(result)
    }
}

/// Validates with the default image probe.
pub fn validate_file(file: &CreativeFile, spec: &AdSpec) -> Result<ValidationResult, ValidateError> {
    Validator::new().validate(file, spec)
}
