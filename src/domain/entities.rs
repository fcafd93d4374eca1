//! Domain entities: STR descriptors and DNA profiles

use std::fmt;

use crate::domain::sequence::ReferenceSequences;

/// Short tandem repeat: a DNA pattern and how often it is expected to occur.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrDescriptor {
    /// Repeat pattern, e.g. "AGAT"
    pub pattern: String,
    /// Expected number of occurrences across both reference sequences
    pub occurrences: usize,
}

impl StrDescriptor {
    pub fn new(pattern: impl Into<String>, occurrences: usize) -> Self {
        Self {
            pattern: pattern.into(),
            occurrences,
        }
    }

    /// True if the combined occurrence count equals the expected count.
    pub fn matches(&self, sequences: &ReferenceSequences) -> bool {
        sequences.combined_occurrences(&self.pattern) == self.occurrences
    }
}

impl fmt::Display for StrDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.pattern, self.occurrences)
    }
}

/// A person's DNA profile.
///
/// The STR list keeps input order. `of_interest` starts out false and is only
/// meaningful after the tree has been classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    strs: Vec<StrDescriptor>,
    of_interest: bool,
}

impl Profile {
    pub fn new(strs: Vec<StrDescriptor>) -> Self {
        Self {
            strs,
            of_interest: false,
        }
    }

    pub fn strs(&self) -> &[StrDescriptor] {
        &self.strs
    }

    pub fn is_of_interest(&self) -> bool {
        self.of_interest
    }

    pub fn set_of_interest(&mut self, of_interest: bool) {
        self.of_interest = of_interest;
    }

    /// Number of STRs whose combined occurrence count matches exactly.
    pub fn matching_strs(&self, sequences: &ReferenceSequences) -> usize {
        self.strs.iter().filter(|s| s.matches(sequences)).count()
    }

    /// At least half of the STRs, rounded up.
    pub fn required_matches(&self) -> usize {
        self.strs.len().div_ceil(2)
    }

    /// Whether this profile qualifies as of interest.
    ///
    /// A profile without STRs needs zero matches and therefore qualifies.
    pub fn evaluate(&self, sequences: &ReferenceSequences) -> bool {
        self.matching_strs(sequences) >= self.required_matches()
    }
}
