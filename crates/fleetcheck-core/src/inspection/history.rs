use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{InspectError, Result};

use super::store::normalize_vehicle_id;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionKind {
    Photo,
    Video,
}

impl std::fmt::Display for InspectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Photo => write!(f, "Photo"),
            Self::Video => write!(f, "Video"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overall {
    Clean,
    Damaged,
}

impl Overall {
    pub fn from_damage_points(points: usize) -> Self {
        if points > 0 { Self::Damaged } else { Self::Clean }
    }
}

impl std::fmt::Display for Overall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => write!(f, "Clean"),
            Self::Damaged => write!(f, "Damaged"),
        }
    }
}

/// One completed inspection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: NaiveDateTime,
    pub vehicle_id: String,
    pub inspector: String,
    pub kind: InspectionKind,
    pub damage_points: usize,
    pub overall: Overall,
}

impl HistoryRecord {
    pub fn new(
        date: NaiveDateTime,
        vehicle_id: impl Into<String>,
        inspector: impl Into<String>,
        kind: InspectionKind,
        damage_points: usize,
    ) -> Self {
        Self {
            date,
            vehicle_id: vehicle_id.into(),
            inspector: inspector.into(),
            kind,
            damage_points,
            overall: Overall::from_damage_points(damage_points),
        }
    }
}

/// Append-only inspection log, one JSON object per line.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. The line is written with a single `write_all`.
    pub fn append(&self, record: &HistoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        debug!(vehicle = %record.vehicle_id, overall = %record.overall, "History record appended");
        Ok(())
    }

    /// All records in append order. A missing log is empty.
    pub fn load(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(InspectError::from))
            .collect()
    }

    /// Up to `limit` records for one vehicle, newest first.
    pub fn for_vehicle(&self, vehicle_id: &str, limit: usize) -> Result<Vec<HistoryRecord>> {
        let id = normalize_vehicle_id(vehicle_id)?;
        let mut records: Vec<HistoryRecord> = self
            .load()?
            .into_iter()
            .filter(|r| r.vehicle_id == id)
            .collect();
        // Stable sort keeps append order reversed among equal timestamps.
        records.reverse();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(limit);
        Ok(records)
    }

    /// Distinct vehicle ids, sorted.
    pub fn vehicles(&self) -> Result<Vec<String>> {
        let ids: BTreeSet<String> = self.load()?.into_iter().map(|r| r.vehicle_id).collect();
        Ok(ids.into_iter().collect())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
