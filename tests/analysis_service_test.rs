//! Tests for AnalysisService

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use forensic::application::services::AnalysisService;
use forensic::application::ApplicationError;
use forensic::domain::DomainError;
use forensic::infrastructure::traits::{FileSystem, RealFileSystem};
use forensic::util::testing;

const SAMPLE: &str = "AAATTTAGATAGAT
GCGCAGAT
5
Jane Doe 2 AA 1 GC 2
John Roe 2 AGAT 3 TT 1
Ann Moe 2 AA 4 GC 4
Bob Poe 3 AGAT 9 GC 1 CC 2
Eve Zoe 0
";

/// Helper to create temp data files for testing
fn create_data_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write data file");
    path
}

fn service() -> AnalysisService {
    AnalysisService::new(Arc::new(RealFileSystem))
}

/// In-memory filesystem
#[derive(Default)]
struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

#[test]
fn given_data_file_when_loading_then_builds_unflagged_database() {
    // Arrange
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "people.txt", SAMPLE);

    // Act
    let db = service().load(&path).unwrap();

    // Assert
    assert_eq!(db.first_unknown_sequence(), "AAATTTAGATAGAT");
    assert_eq!(db.second_unknown_sequence(), "GCGCAGAT");
    assert_eq!(
        db.tree().names(),
        vec!["Doe, Jane", "Moe, Ann", "Poe, Bob", "Roe, John", "Zoe, Eve"]
    );
    assert_eq!(db.matching_profile_count(true), 0);
}

#[test]
fn given_data_file_when_analyzing_then_reports_flag_counts() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "people.txt", SAMPLE);

    // Act
    let report = service().analyze(&path).unwrap();

    // Assert
    // Doe: AA=1, GC=2 -> 2/2; Roe: AGAT=3, TT=1 -> 2/2; Moe: 0/2;
    // Poe: AGAT 3!=9, GC 2!=1, CC 0!=2 -> 0/3; Zoe: no STRs -> flagged
    assert_eq!(report.flagged, 3);
    assert_eq!(report.unflagged, 2);
    // tree: Doe(root) -> Roe(right) -> Moe(left of Roe) -> Poe(right of Moe), Zoe(right of Roe)
    assert_eq!(report.unmarked, vec!["Moe, Ann", "Poe, Bob"]);
}

#[test]
fn given_data_file_when_cleaning_up_then_removes_unflagged() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "people.txt", SAMPLE);

    // Act
    let report = service().cleanup(&path).unwrap();

    // Assert
    assert_eq!(report.removed, vec!["Moe, Ann", "Poe, Bob"]);
    assert_eq!(report.remaining, vec!["Doe, Jane", "Roe, John", "Zoe, Eve"]);
}

#[test]
fn given_names_when_removing_then_reports_removed_and_missing() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "people.txt", SAMPLE);
    let names = vec!["Doe, Jane".to_string(), "Nobody, Here".to_string()];

    // Act
    let report = service().remove(&path, &names, false).unwrap();

    // Assert
    assert_eq!(report.removed, vec!["Doe, Jane"]);
    assert_eq!(report.missing, vec!["Nobody, Here"]);
    assert_eq!(report.remaining.len(), 4);
    assert!(!report.remaining.contains(&"Doe, Jane".to_string()));
}

#[test]
fn given_missing_file_when_loading_then_operation_fails() {
    // Arrange
    let temp = TempDir::new().unwrap();

    // Act
    let result = service().load(&temp.path().join("absent.txt"));

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::OperationFailed { .. })
    ));
}

#[test]
fn given_malformed_file_when_loading_then_domain_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "broken.txt", "AAAA\nCCCC\ntwo\n");

    // Act
    let result = service().load(&path);

    // Assert
    match result {
        Err(ApplicationError::Domain(DomainError::InvalidNumber { field, value })) => {
            assert_eq!(field, "number of people");
            assert_eq!(value, "two");
        }
        other => panic!("expected invalid number, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn given_memory_filesystem_when_analyzing_then_uses_it() {
    // Arrange
    let mut fs = MemoryFileSystem::default();
    let path = PathBuf::from("/cases/people.txt");
    fs.files.insert(path.clone(), SAMPLE.to_string());
    let service = AnalysisService::new(Arc::new(fs));

    // Act
    let report = service.analyze(&path).unwrap();

    // Assert
    assert_eq!(report.flagged + report.unflagged, 5);
}
