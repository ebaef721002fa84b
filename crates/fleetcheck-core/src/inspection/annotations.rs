use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;
use crate::frame::Capture;
use crate::io::save_capture;
use crate::pipeline::AnnotationSink;

/// Writes annotated captures as `<dir>/<name>.png`.
#[derive(Clone, Debug)]
pub struct DirectoryAnnotationSink {
    dir: PathBuf,
}

impl DirectoryAnnotationSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AnnotationSink for DirectoryAnnotationSink {
    fn store(&self, name: &str, capture: &Capture) -> Result<PathBuf> {
        let path = self.dir.join(format!("{name}.png"));
        save_capture(capture, &path)?;
        Ok(path)
    }
}

/// Keeps annotated captures in memory, keyed by name.
///
/// Returned paths are the bare names with a `.png` suffix.
#[derive(Debug, Default)]
pub struct MemoryAnnotationSink {
    stored: Mutex<HashMap<String, Capture>>,
}

impl MemoryAnnotationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Capture> {
        self.stored
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .stored
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl AnnotationSink for MemoryAnnotationSink {
    fn store(&self, name: &str, capture: &Capture) -> Result<PathBuf> {
        self.stored
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string(), capture.clone());
        Ok(PathBuf::from(format!("{name}.png")))
    }
}
