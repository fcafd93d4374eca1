//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::AnalysisService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub analysis: AnalysisService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let analysis = AnalysisService::new(fs);

        Self { settings, analysis }
    }

    /// Data file to operate on: the explicit argument wins over the configured default.
    pub fn data_file(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| self.settings.data_file.clone())
    }
}
