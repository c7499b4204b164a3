// store.rs — TrackerStore: persistence for Tracker state.
//
// The whole tracker lives in a single JSON file. Writes go to a sibling
// temp file that is renamed over the target, so a crash mid-write leaves
// the previous record intact. Loads decode completely before anything is
// handed to the caller.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::QuestError;
use crate::tracker::Tracker;

/// File-backed store for one tracker.
pub struct TrackerStore {
    path: PathBuf,
}

impl TrackerStore {
    /// Create a store for the given data file. Nothing is touched on disk
    /// until the first save or load.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the tracker to disk (creates or overwrites).
    pub fn save(&self, tracker: &Tracker) -> Result<(), QuestError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
        let json = codec::to_json(tracker)?;

        let tmp = self.temp_path();
        let written = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            return Err(io_error(&tmp, source));
        }
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            io_error(&self.path, source)
        })?;

        tracing::info!(
            path = %self.path.display(),
            goals = tracker.list_goals().len(),
            score = tracker.total_score(),
            "tracker saved"
        );
        Ok(())
    }

    /// Sibling file a save is staged in before the rename.
    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Read and decode the tracker. A missing file is an error.
    pub fn load(&self) -> Result<Tracker, QuestError> {
        let json = fs::read_to_string(&self.path).map_err(|source| io_error(&self.path, source))?;
        let tracker = codec::from_json(&json)?;
        tracing::info!(
            path = %self.path.display(),
            goals = tracker.list_goals().len(),
            score = tracker.total_score(),
            "tracker loaded"
        );
        Ok(tracker)
    }

    /// Like `load`, but a missing file yields an empty tracker.
    pub fn load_or_default(&self) -> Result<Tracker, QuestError> {
        match self.load() {
            Err(QuestError::IoError { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved tracker, starting fresh");
                Ok(Tracker::new())
            }
            other => other,
        }
    }

    /// Replace `tracker` with the stored state. On failure `tracker` is
    /// left exactly as it was.
    pub fn load_into(&self, tracker: &mut Tracker) -> Result<(), QuestError> {
        *tracker = self.load()?;
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> QuestError {
    QuestError::IoError {
        path: path.display().to_string(),
        source,
    }
}
