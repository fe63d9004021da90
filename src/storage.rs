use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::SchedulerError;

pub const SLOT_NAME: &str = "interviews";

/// A single named durable slot holding one JSON document.
///
/// Every save overwrites the whole document. Writes go to a sibling temp
/// file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct Slot {
    path: PathBuf,
}

impl Slot {
    pub fn new(location: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: location.as_ref().join(format!("{}.json", name)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, SchedulerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SchedulerError::PersistenceRead(e.to_string())),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SchedulerError::PersistenceRead(e.to_string()))
    }

    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), SchedulerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string(value)?;
        let tmp = self.path.with_extension(format!("{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, payload)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), "slot written");
        Ok(())
    }
}
