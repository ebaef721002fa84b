use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::ImageFormat;
use tracing::debug;

use crate::error::{InspectError, Result};
use crate::frame::Capture;
use crate::io::load_capture;
use crate::pipeline::Angle;

/// Canonical form of a vehicle identifier: whitespace removed, uppercased.
///
/// Identifiers that are empty after normalization or that could escape a
/// storage directory are rejected.
pub fn normalize_vehicle_id(raw: &str) -> Result<String> {
    let id: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    if id.is_empty() {
        return Err(InspectError::Store("vehicle id is empty".into()));
    }
    if id.contains(['/', '\\']) || id.contains("..") {
        return Err(InspectError::Store(format!("invalid vehicle id: {raw}")));
    }
    Ok(id)
}

/// Identifies the reference capture of one angle of one vehicle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    vehicle_id: String,
    angle: Angle,
}

impl ReferenceKey {
    pub fn new(vehicle_id: &str, angle: Angle) -> Result<Self> {
        Ok(Self {
            vehicle_id: normalize_vehicle_id(vehicle_id)?,
            angle,
        })
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }
}

/// Keeps the most recent capture per vehicle and angle.
pub trait ReferenceStore: Send + Sync {
    fn get(&self, key: &ReferenceKey) -> Result<Option<Capture>>;

    /// Replace the reference for `key`.
    fn put(&self, key: &ReferenceKey, capture: &Capture) -> Result<()>;
}

/// Reference store laid out as `<root>/<VEHICLE>/<angle>.png`.
#[derive(Clone, Debug)]
pub struct FsReferenceStore {
    root: PathBuf,
}

impl FsReferenceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &ReferenceKey) -> PathBuf {
        self.root
            .join(key.vehicle_id())
            .join(format!("{}.png", key.angle().as_str()))
    }
}

impl ReferenceStore for FsReferenceStore {
    fn get(&self, key: &ReferenceKey) -> Result<Option<Capture>> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Ok(None);
        }
        load_capture(&path).map(Some)
    }

    fn put(&self, key: &ReferenceKey, capture: &Capture) -> Result<()> {
        let path = self.path_for(key);
        let dir = self.root.join(key.vehicle_id());
        fs::create_dir_all(&dir)?;

        // Readers never observe a partially written reference.
        let tmp = dir.join(format!(".{}.png.tmp", key.angle().as_str()));
        capture.pixels.save_with_format(&tmp, ImageFormat::Png)?;
        fs::rename(&tmp, &path)?;

        debug!(vehicle = key.vehicle_id(), angle = key.angle().as_str(), path = %path.display(), "Reference stored");
        Ok(())
    }
}

/// In-memory reference store.
#[derive(Debug, Default)]
pub struct MemoryReferenceStore {
    entries: Mutex<HashMap<ReferenceKey, Capture>>,
}

impl MemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ReferenceKey, Capture>> {
        // A poisoned map still holds whole captures.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReferenceStore for MemoryReferenceStore {
    fn get(&self, key: &ReferenceKey) -> Result<Option<Capture>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &ReferenceKey, capture: &Capture) -> Result<()> {
        self.lock().insert(key.clone(), capture.clone());
        Ok(())
    }
}
