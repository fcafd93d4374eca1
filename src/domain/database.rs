//! Forensic database: the profile tree plus the two unknown sequences.

use std::str::SplitWhitespace;

use tracing::{debug, instrument};

use crate::domain::arena::ProfileTree;
use crate::domain::entities::{Profile, StrDescriptor};
use crate::domain::error::DomainError;
use crate::domain::sequence::ReferenceSequences;

/// Result type for parsing a database.
pub type DomainResult<T> = Result<T, DomainError>;

/// Profiles indexed by name, and the sequences they are flagged against.
#[derive(Debug, Default)]
pub struct ForensicDatabase {
    tree: ProfileTree,
    sequences: ReferenceSequences,
}

impl ForensicDatabase {
    pub fn new(sequences: ReferenceSequences) -> Self {
        Self {
            tree: ProfileTree::new(),
            sequences,
        }
    }

    /// Parse the data file format.
    ///
    /// ```text
    /// <first unknown sequence>
    /// <second unknown sequence>
    /// <number of people>
    /// <first> <last> <number of STRs> (<pattern> <occurrences>)...
    /// ...
    /// ```
    ///
    /// Person records are whitespace separated and may span lines. Each person
    /// is keyed as "last, first" and inserted in file order.
    #[instrument(level = "debug", skip(content))]
    pub fn parse(content: &str) -> DomainResult<Self> {
        let mut lines = content.lines();
        let first = lines
            .next()
            .ok_or_else(|| DomainError::eof("first unknown sequence"))?;
        let second = lines
            .next()
            .ok_or_else(|| DomainError::eof("second unknown sequence"))?;
        let people_line = lines
            .next()
            .ok_or_else(|| DomainError::eof("number of people"))?;
        let people = parse_count("number of people", people_line.trim())?;

        let mut db = Self::new(ReferenceSequences::new(first.trim(), second.trim()));

        let rest = lines.collect::<Vec<_>>().join("\n");
        let mut tokens = Tokens::new(&rest);
        for _ in 0..people {
            let first_name = tokens.next("first name")?;
            let last_name = tokens.next("last name")?;
            let profile = tokens.profile()?;
            db.insert_person(format!("{}, {}", last_name, first_name), profile);
        }
        if let Some(extra) = tokens.inner.next() {
            debug!("ignoring trailing data starting at {:?}", extra);
        }

        debug!("parsed {} people", db.tree.len());
        Ok(db)
    }

    pub fn tree(&self) -> &ProfileTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ProfileTree {
        &mut self.tree
    }

    /// Replace the whole tree, returning the previous one.
    pub fn replace_tree(&mut self, tree: ProfileTree) -> ProfileTree {
        std::mem::replace(&mut self.tree, tree)
    }

    pub fn sequences(&self) -> &ReferenceSequences {
        &self.sequences
    }

    pub fn first_unknown_sequence(&self) -> &str {
        &self.sequences.first
    }

    pub fn set_first_unknown_sequence(&mut self, sequence: impl Into<String>) {
        self.sequences.first = sequence.into();
    }

    pub fn second_unknown_sequence(&self) -> &str {
        &self.sequences.second
    }

    pub fn set_second_unknown_sequence(&mut self, sequence: impl Into<String>) {
        self.sequences.second = sequence.into();
    }

    pub fn insert_person(&mut self, name: impl Into<String>, profile: Profile) {
        let name: String = name.into();
        self.tree.insert(name, profile);
    }

    pub fn matching_profile_count(&self, of_interest: bool) -> usize {
        self.tree.count(of_interest)
    }

    pub fn flag_profiles_of_interest(&mut self) {
        self.tree.classify(&self.sequences);
    }

    pub fn unmarked_people(&self) -> Vec<String> {
        self.tree.unmarked()
    }

    pub fn remove_person(&mut self, name: &str) {
        self.tree.remove(name);
    }

    /// Remove every unflagged person; returns the removed names in level order.
    pub fn cleanup_tree(&mut self) -> Vec<String> {
        self.tree.cleanup()
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
        }
    }

    fn next(&mut self, expected: &str) -> DomainResult<&'a str> {
        self.inner.next().ok_or_else(|| DomainError::eof(expected))
    }

    fn count(&mut self, field: &str) -> DomainResult<usize> {
        let token = self.next(field)?;
        parse_count(field, token)
    }

    fn profile(&mut self) -> DomainResult<Profile> {
        let size = self.count("number of STRs")?;
        let strs = (0..size)
            .map(|_| {
                let pattern = self.next("STR pattern")?;
                let occurrences = self.count("STR occurrences")?;
                Ok(StrDescriptor::new(pattern, occurrences))
            })
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Profile::new(strs))
    }
}

fn parse_count(field: &str, value: &str) -> DomainResult<usize> {
    value.parse().map_err(|_| DomainError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "AAATTT\nGCGC\n2\nJane Doe 2 AA 1 GC 2\nJohn Roe 1 TT 4\n";

    #[test]
    fn test_parse_sample() {
        let db = ForensicDatabase::parse(SAMPLE).unwrap();
        assert_eq!(db.first_unknown_sequence(), "AAATTT");
        assert_eq!(db.second_unknown_sequence(), "GCGC");
        assert_eq!(db.tree().names(), vec!["Doe, Jane", "Roe, John"]);

        let jane = db.tree().get("Doe, Jane").unwrap();
        assert_eq!(
            jane.strs(),
            &[StrDescriptor::new("AA", 1), StrDescriptor::new("GC", 2)]
        );
    }

    #[test]
    fn test_parse_records_spanning_lines() {
        let content = "A\nC\n1\nJane Doe\n2\nAA 1\nGC 2";
        let db = ForensicDatabase::parse(content).unwrap();
        assert_eq!(db.tree().get("Doe, Jane").unwrap().strs().len(), 2);
    }

    #[test]
    fn test_parse_invalid_people_count() {
        let err = ForensicDatabase::parse("A\nC\nmany\n").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidNumber {
                field: "number of people".into(),
                value: "many".into()
            }
        );
    }

    #[test]
    fn test_parse_truncated_profile() {
        let err = ForensicDatabase::parse("A\nC\n1\nJane Doe 2 AA 1\n").unwrap_err();
        assert_eq!(err, DomainError::UnexpectedEof("STR pattern".into()));
    }

    #[test]
    fn test_parse_invalid_str_occurrences() {
        let err = ForensicDatabase::parse("A\nC\n1\nJane Doe 1 AA x\n").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidNumber {
                field: "STR occurrences".into(),
                value: "x".into()
            }
        );
    }

    #[test]
    fn test_parse_ignores_trailing_data() {
        let db = ForensicDatabase::parse("A\nC\n1\nJane Doe 0\nJohn Roe 1 TT 4\n").unwrap();
        assert_eq!(db.tree().names(), vec!["Doe, Jane"]);
    }

    #[test]
    fn test_parse_missing_sequence() {
        let err = ForensicDatabase::parse("AAAA").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnexpectedEof("second unknown sequence".into())
        );
    }

    #[test]
    fn test_flag_and_cleanup() {
        let mut db = ForensicDatabase::parse(SAMPLE).unwrap();
        db.flag_profiles_of_interest();
        assert_eq!(db.matching_profile_count(true), 1);
        assert_eq!(db.unmarked_people(), vec!["Roe, John"]);

        let removed = db.cleanup_tree();
        assert_eq!(removed, vec!["Roe, John"]);
        assert_eq!(db.tree().names(), vec!["Doe, Jane"]);
    }

    #[test]
    fn test_replace_tree() {
        let mut db = ForensicDatabase::parse(SAMPLE).unwrap();
        let old = db.replace_tree(ProfileTree::new());
        assert_eq!(old.len(), 2);
        assert!(db.tree().is_empty());
    }

    #[test]
    fn test_changed_sequences_reclassify() {
        let mut db = ForensicDatabase::parse(SAMPLE).unwrap();
        db.set_first_unknown_sequence("TTTTTTTT");
        db.set_second_unknown_sequence("");
        db.flag_profiles_of_interest();
        // John: TT occurs 4 times without overlap; Jane matches nothing
        assert_eq!(db.unmarked_people(), vec!["Doe, Jane"]);
        assert_eq!(db.sequences().second, "");
    }
}
