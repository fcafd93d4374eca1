//! Reference sequences and STR occurrence counting

/// Count non-overlapping occurrences of `pattern` in `sequence`.
///
/// Scans left to right; after a match at index `i` the scan resumes at
/// `i + pattern.len()`. A pattern longer than the sequence yields 0 without
/// scanning. An empty pattern yields 0.
pub fn occurrences(sequence: &str, pattern: &str) -> usize {
    if pattern.is_empty() || pattern.len() > sequence.len() {
        return 0;
    }
    sequence.matches(pattern).count()
}

/// The two unknown sequences profiles are matched against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSequences {
    /// First unknown sequence
    pub first: String,
    /// Second unknown sequence
    pub second: String,
}

impl ReferenceSequences {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Occurrences of `pattern` in the first sequence plus those in the second.
    ///
    /// Each sequence is scanned on its own, so a match spanning the boundary
    /// between them is not counted.
    pub fn combined_occurrences(&self, pattern: &str) -> usize {
        occurrences(&self.first, pattern) + occurrences(&self.second, pattern)
    }
}
