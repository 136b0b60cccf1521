//! Persisted target address
//!
//! The link only needs to read the last simulator address at startup and
//! write it back whenever the operator changes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key-value store holding the simulator address.
pub trait PreferenceStore: Send {
    /// Stored address, if any.
    fn load(&self) -> Option<String>;

    /// Persist a new address.
    fn save(&mut self, host: &str) -> io::Result<()>;
}

/// Volatile store, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    host: Option<String>,
}

impl MemoryPreferences {
    /// Store pre-populated with `host`.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Option<String> {
        self.host.clone()
    }

    fn save(&mut self, host: &str) -> io::Result<()> {
        self.host = Some(host.to_owned());
        Ok(())
    }
}

/// Store keeping the address as a single line in a text file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let host = contents.trim();
        (!host.is_empty()).then(|| host.to_owned())
    }

    fn save(&mut self, host: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, format!("{}\n", host.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("xplane-ap-{}-{name}", std::process::id()))
            .join("target_host")
    }

    #[test]
    fn test_memory_roundtrip() {
        let mut prefs = MemoryPreferences::default();
        assert_eq!(prefs.load(), None);

        prefs.save("10.0.0.7").unwrap();
        assert_eq!(prefs.load().as_deref(), Some("10.0.0.7"));
    }

    #[test]
    fn test_file_missing_is_none() {
        let prefs = FilePreferences::new(scratch_path("missing"));
        assert_eq!(prefs.load(), None);
    }

    #[test]
    fn test_file_roundtrip_creates_parent() {
        let path = scratch_path("roundtrip");
        let mut prefs = FilePreferences::new(&path);

        prefs.save(" 192.168.0.12 ").unwrap();
        assert_eq!(prefs.load().as_deref(), Some("192.168.0.12"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "192.168.0.12\n"
        );

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_blank_file_is_none() {
        let path = scratch_path("blank");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "  \n").unwrap();

        assert_eq!(FilePreferences::new(&path).load(), None);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
