//! Forensic analysis service
//!
//! Loads a data file into a [`ForensicDatabase`] and runs flagging, removal
//! and cleanup on it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::ForensicDatabase;
use crate::infrastructure::traits::FileSystem;

/// Outcome of flagging a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Number of profiles of interest
    pub flagged: usize,
    /// Number of profiles not of interest
    pub unflagged: usize,
    /// Names of unflagged people, level order
    pub unmarked: Vec<String>,
}

/// Outcome of removing every unflagged profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Removed names, level order
    pub removed: Vec<String>,
    /// Names still in the tree, sorted
    pub remaining: Vec<String>,
}

/// Outcome of removing named profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub removed: Vec<String>,
    /// Requested names that were not in the tree
    pub missing: Vec<String>,
    /// Names still in the tree, sorted
    pub remaining: Vec<String>,
}

/// Service for running the forensic analysis on data files.
pub struct AnalysisService {
    fs: Arc<dyn FileSystem>,
}

impl AnalysisService {
    /// Create a new analysis service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a data file. Profiles are not flagged yet.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<ForensicDatabase> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("data file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "data file does not exist",
                )),
            });
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read data file", path)?;
        let db = ForensicDatabase::parse(&content)?;
        info!("loaded {} profiles from {}", db.tree().len(), path.display());
        Ok(db)
    }

    /// Load and flag a data file.
    pub fn load_flagged(&self, path: &Path) -> ApplicationResult<ForensicDatabase> {
        let mut db = self.load(path)?;
        db.flag_profiles_of_interest();
        Ok(db)
    }

    /// Flag all profiles and summarize the result.
    #[instrument(level = "debug", skip(self))]
    pub fn analyze(&self, path: &Path) -> ApplicationResult<AnalysisReport> {
        let db = self.load_flagged(path)?;
        let report = AnalysisReport {
            flagged: db.matching_profile_count(true),
            unflagged: db.matching_profile_count(false),
            unmarked: db.unmarked_people(),
        };
        debug!(
            "analyze: {} flagged, {} unflagged",
            report.flagged, report.unflagged
        );
        Ok(report)
    }

    /// Flag all profiles, then remove the ones not of interest.
    #[instrument(level = "debug", skip(self))]
    pub fn cleanup(&self, path: &Path) -> ApplicationResult<CleanupReport> {
        let mut db = self.load_flagged(path)?;
        let removed = db.cleanup_tree();
        Ok(CleanupReport {
            removed,
            remaining: db.tree().names(),
        })
    }

    /// Remove the given people, optionally flagging first.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(
        &self,
        path: &Path,
        names: &[String],
        flag_first: bool,
    ) -> ApplicationResult<RemovalReport> {
        let mut db = if flag_first {
            self.load_flagged(path)?
        } else {
            self.load(path)?
        };

        let mut removed = Vec::new();
        let mut missing = Vec::new();
        for name in names {
            if db.tree().contains(name) {
                db.remove_person(name);
                removed.push(name.clone());
            } else {
                debug!("remove: {} not in tree", name);
                missing.push(name.clone());
            }
        }

        Ok(RemovalReport {
            removed,
            missing,
            remaining: db.tree().names(),
        })
    }
}
