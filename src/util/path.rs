use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Unknown variables leave the input untouched.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

pub trait PathExt {
    fn expanded(&self) -> PathBuf;
}

impl PathExt for Path {
    fn expanded(&self) -> PathBuf {
        PathBuf::from(expand_env_vars(self.to_string_lossy().as_ref()))
    }
}
