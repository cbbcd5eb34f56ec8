//! Outcome reporting shared by the fill operations

use std::fmt;

/// A warning generated by an operation that completed but did little or nothing
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What a drawing or fill operation did to the canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    /// Number of pixel writes performed (a pixel written twice counts twice).
    pub pixels: usize,
    pub warnings: Vec<Warning>,
}

impl FillReport {
    pub fn new(pixels: usize) -> Self {
        Self { pixels, warnings: Vec::new() }
    }

    /// A report for an operation that wrote nothing, with the reason.
    pub fn noop(reason: impl Into<String>) -> Self {
        let mut report = Self::default();
        report.warn(reason);
        report
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let warning = Warning::new(message);
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: FillReport) {
        self.pixels += other.pixels;
        self.warnings.extend(other.warnings);
    }
}
