use crate::record::{Record, Severity};

/// Threshold gate applied to every mapped record before rendering.
///
/// The threshold is fixed for the process lifetime. A record passes when its
/// severity ordinal is lower than or equal to the threshold's, so the
/// boundary is inclusive: with a `Warning` threshold, `Warning` records are
/// still rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeverityFilter {
    threshold: Severity,
}

impl SeverityFilter {
    pub fn new(threshold: Severity) -> Self {
        SeverityFilter { threshold }
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Admission decision for one record.
    pub fn admits(&self, record: &Record) -> bool {
        record.severity <= self.threshold
    }
}
