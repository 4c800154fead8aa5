use serde::{Deserialize, Serialize};

use adspec_core::{AdSpec, MediaFormat, Severity, ValidationMessage};

use crate::error::ValidateError;
use crate::file::CreativeFile;
use crate::probe::{Dimensions, ImageProbe};

/// Relative per-axis deviation under which a size mismatch is only a warning.
pub const DIMENSION_TOLERANCE: f64 = 0.05;
/// Absolute width/height ratio deviation above which an aspect warning is raised.
pub const ASPECT_RATIO_TOLERANCE: f64 = 0.01;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Check {
    Format,
    Size,
    Dimensions,
    AspectRatio,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub rule_id: String,
    pub check: Check,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn new(rule_id: &str, check: Check, severity: Severity, message: String) -> Self {
        Self { rule_id: rule_id.to_string(), check, severity, message }
    }

    pub fn into_message(self) -> ValidationMessage {
        ValidationMessage::new(self.severity, self.message)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ValidateInput<'a> {
    pub file: &'a CreativeFile,
    pub spec: &'a AdSpec,
}

pub trait Rule: Send + Sync {
    fn id(&self) -> &str;
    fn eval(&self, input: &ValidateInput<'_>) -> Result<Vec<Finding>, ValidateError>;
}

/// MIME family against the spec's format, then extension against `file_type`.
pub struct FormatRule;

impl FormatRule {
    fn extension_accepted(ext: &str, accepted: &[String]) -> bool {
        accepted.iter().any(|t| {
            let t = t.to_ascii_uppercase();
            t == ext || (is_jpeg_alias(&t) && is_jpeg_alias(ext))
        })
    }
}

fn is_jpeg_alias(ext: &str) -> bool {
    ext == "JPG" || ext == "JPEG"
}

impl Rule for FormatRule {
    fn id(&self) -> &str {
        "format"
    }

    fn eval(&self, input: &ValidateInput<'_>) -> Result<Vec<Finding>, ValidateError> {
        let ValidateInput { file, spec } = *input;
        let fail = |expected: &str| {
            Finding::new(
                self.id(),
                Check::Format,
                Severity::Error,
                format!("Expected {} format, but got {}.", expected, file.mime()),
            )
        };
        match spec.format {
            MediaFormat::Video if !file.is_video() => return Ok(vec![fail("video")]),
            MediaFormat::Image if !file.is_image() => return Ok(vec![fail("image")]),
            _ => {}
        }

        let recommended = spec.file_type.join(", ");
        let finding = match file.extension() {
            Some(ext) if Self::extension_accepted(&ext, &spec.file_type) => Finding::new(
                self.id(),
                Check::Format,
                Severity::Success,
                format!("File format matches {} ({}).", spec.format, ext),
            ),
            Some(ext) => Finding::new(
                self.id(),
                Check::Format,
                Severity::Warning,
                format!("File extension .{} might not be supported. Recommended: {}", ext, recommended),
            ),
            None => Finding::new(
                self.id(),
                Check::Format,
                Severity::Warning,
                format!("File has no extension. Recommended: {}", recommended),
            ),
        };
        Ok(vec![finding])
    }
}

/// Byte length against `max_file_size_bytes`.
pub struct SizeRule;

impl Rule for SizeRule {
    fn id(&self) -> &str {
        "size"
    }

    fn eval(&self, input: &ValidateInput<'_>) -> Result<Vec<Finding>, ValidateError> {
        let ValidateInput { file, spec } = *input;
        let finding = match spec.byte_limit() {
            Some(limit) if file.size() > limit => Finding::new(
                self.id(),
                Check::Size,
                Severity::Error,
                format!(
                    "File size {:.2}MB exceeds limit of {}.",
                    file.size() as f64 / BYTES_PER_MB,
                    spec.max_file_size
                ),
            ),
            _ => Finding::new(
                self.id(),
                Check::Size,
                Severity::Success,
                format!("File size within limit ({}).", spec.max_file_size),
            ),
        };
        Ok(vec![finding])
    }
}

/// Pixel size and aspect ratio of image creatives. Skipped for anything whose
/// MIME type is not `image/*` and for specs without numeric dimensions.
pub struct DimensionRule<P> {
    probe: P,
}

impl<P: ImageProbe> DimensionRule<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    fn judge(&self, actual: Dimensions, target: Dimensions, aspect_label: &str) -> Vec<Finding> {
        let mut findings = Vec::with_capacity(2);
        if actual == target {
            findings.push(Finding::new(
                self.id(),
                Check::Dimensions,
                Severity::Success,
                format!("Dimensions match exactly: {}.", actual),
            ));
        } else {
            let width_diff = axis_deviation(actual.width, target.width);
            let height_diff = axis_deviation(actual.height, target.height);
            if width_diff < DIMENSION_TOLERANCE && height_diff < DIMENSION_TOLERANCE {
                findings.push(Finding::new(
                    self.id(),
                    Check::Dimensions,
                    Severity::Warning,
                    format!("Dimensions {} are close to recommended {}.", actual, target),
                ));
            } else {
                findings.push(Finding::new(
                    self.id(),
                    Check::Dimensions,
                    Severity::Error,
                    format!("Incorrect dimensions: {}. Required: {}.", actual, target),
                ));
            }
        }

        let target_ratio = target.ratio();
        let actual_ratio = actual.ratio();
        if (target_ratio - actual_ratio).abs() > ASPECT_RATIO_TOLERANCE {
            findings.push(Finding::new(
                self.id(),
                Check::AspectRatio,
                Severity::Warning,
                format!(
                    "Aspect ratio {:.2} differs from target {:.2} ({}).",
                    actual_ratio, target_ratio, aspect_label
                ),
            ));
        }
        findings
    }
}

fn axis_deviation(actual: u32, target: u32) -> f64 {
    (f64::from(actual) - f64::from(target)).abs() / f64::from(target)
}

impl<P: ImageProbe> Rule for DimensionRule<P> {
    fn id(&self) -> &str {
        "dimensions"
    }

    fn eval(&self, input: &ValidateInput<'_>) -> Result<Vec<Finding>, ValidateError> {
        let ValidateInput { file, spec } = *input;
        if !file.is_image() {
            return Ok(vec![]);
        }
        let Some((width, height)) = spec.target_dimensions() else {
            return Ok(vec![]);
        };

        let mut source = file.reader()?;
        match self.probe.dimensions(&mut *source) {
            Ok(actual) => Ok(self.judge(actual, Dimensions::new(width, height), &spec.aspect_ratio)),
            Err(e) => {
                tracing::debug!(file = file.name(), error = %e, "image decode failed");
                Ok(vec![Finding::new(
                    self.id(),
                    Check::Dimensions,
                    Severity::Error,
                    format!("Could not read image dimensions: {}.", e),
                )])
            }
        }
    }
}
