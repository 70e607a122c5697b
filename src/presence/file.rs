use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::{ActivityId, ContentState, PresenceAttributes, PresenceError, PresenceService};

/// On-disk shape of a running activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityRecord {
    id: ActivityId,
    attributes: PresenceAttributes,
    content_state: ContentState,
    updated_at: u64,
}

/// Presence backend that keeps the activity as a JSON file.
///
/// The file exists exactly while an activity runs, so status bars and
/// scripts can watch it.
#[derive(Debug, Clone)]
pub struct FilePresence {
    path: PathBuf,
}

impl FilePresence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Result<Option<ActivityRecord>, PresenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_record(&self, record: &ActivityRecord) -> Result<(), PresenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, format!("{json}\n"))?;
        Ok(())
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

fn new_activity_id() -> ActivityId {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    ActivityId(format!("{}-{nanos:x}", std::process::id()))
}

impl PresenceService for FilePresence {
    fn activities_enabled(&self) -> bool {
        true
    }

    fn running(&self) -> Option<ActivityId> {
        match self.read_record() {
            Ok(record) => record.map(|r| r.id),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %self.path.display(),
                    "ignoring unreadable presence record"
                );
                None
            }
        }
    }

    fn request(
        &mut self,
        attributes: &PresenceAttributes,
        state: &ContentState,
    ) -> Result<ActivityId, PresenceError> {
        let record = ActivityRecord {
            id: new_activity_id(),
            attributes: attributes.clone(),
            content_state: state.clone(),
            updated_at: unix_seconds(),
        };
        self.write_record(&record)?;
        Ok(record.id)
    }

    fn update(&mut self, id: &ActivityId, state: &ContentState) -> Result<(), PresenceError> {
        let mut record = match self.read_record()? {
            Some(record) if record.id == *id => record,
            _ => return Err(PresenceError::NotRunning(id.clone())),
        };
        record.content_state = state.clone();
        record.updated_at = unix_seconds();
        self.write_record(&record)
    }

    fn end(&mut self, id: &ActivityId) -> Result<(), PresenceError> {
        match self.read_record() {
            Ok(Some(record)) if record.id != *id => return Ok(()),
            Ok(None) => return Ok(()),
            _ => {}
        }
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Backend used with `--no-presence`: never starts anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPresence;

impl PresenceService for DisabledPresence {
    fn activities_enabled(&self) -> bool {
        false
    }

    fn running(&self) -> Option<ActivityId> {
        None
    }

    fn request(
        &mut self,
        _attributes: &PresenceAttributes,
        _state: &ContentState,
    ) -> Result<ActivityId, PresenceError> {
        Err(PresenceError::Disabled)
    }

    fn update(&mut self, id: &ActivityId, _state: &ContentState) -> Result<(), PresenceError> {
        Err(PresenceError::NotRunning(id.clone()))
    }

    fn end(&mut self, _id: &ActivityId) -> Result<(), PresenceError> {
        Ok(())
    }
}
