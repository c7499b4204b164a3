// events.rs — Activity events and sink dispatch.
//
// The tracker itself holds no sinks. Callers build a `QuestEvent` after a
// successful operation and hand it to an `EventDispatcher`, which fans it
// out to every registered `ActivitySink`. A failing sink is logged and
// skipped; it never turns a completed operation into an error.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuestError;
use crate::goal::{Goal, GoalType};
use crate::tracker::Tracker;

/// Things worth remembering about a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A goal was added to the tracker.
    GoalAdded {
        name: String,
        goal_type: GoalType,
        points: i64,
        timestamp: DateTime<Utc>,
    },

    /// Progress was recorded against a goal.
    EventRecorded {
        name: String,
        delta: i64,
        score: i64,
        completed: bool,
        timestamp: DateTime<Utc>,
    },

    /// The tracker was written to disk.
    TrackerSaved {
        path: String,
        goals: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::GoalAdded { .. } => "goal_added",
            QuestEvent::EventRecorded { .. } => "event_recorded",
            QuestEvent::TrackerSaved { .. } => "tracker_saved",
        }
    }

    pub fn goal_added(goal: &Goal) -> Self {
        QuestEvent::GoalAdded {
            name: goal.name().to_string(),
            goal_type: goal.goal_type(),
            points: goal.points(),
            timestamp: Utc::now(),
        }
    }

    /// Build from the tracker state right after `record_event` returned
    /// `delta` for the goal called `name`.
    pub fn event_recorded(tracker: &Tracker, name: &str, delta: i64) -> Self {
        let goal = tracker.goal(name);
        QuestEvent::EventRecorded {
            name: goal.map_or_else(|| name.to_string(), |g| g.name().to_string()),
            delta,
            score: tracker.total_score(),
            completed: goal.is_some_and(Goal::is_completed),
            timestamp: Utc::now(),
        }
    }

    pub fn tracker_saved(tracker: &Tracker, path: &Path) -> Self {
        QuestEvent::TrackerSaved {
            path: path.display().to_string(),
            goals: tracker.list_goals().len(),
            score: tracker.total_score(),
            timestamp: Utc::now(),
        }
    }
}

/// Receives activity events.
pub trait ActivitySink {
    fn send(&self, event: &QuestEvent) -> Result<(), QuestError>;

    /// Short label used when reporting a failed delivery.
    fn describe(&self) -> String;
}

/// Appends events as JSONL to a file, one line per event.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ActivitySink for LogSink {
    fn send(&self, event: &QuestEvent) -> Result<(), QuestError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| QuestError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let line = serde_json::to_string(event)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|file| {
                let mut out = BufWriter::new(file);
                writeln!(out, "{}", line)?;
                out.flush()
            })
            .map_err(|source| QuestError::IoError {
                path: self.path.display().to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        format!("activity log {}", self.path.display())
    }
}

/// Fans events out to every registered sink.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn ActivitySink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: Box<dyn ActivitySink>) {
        self.sinks.push(sink);
    }

    /// Deliver `event` to every sink and return how many accepted it.
    pub fn dispatch(&self, event: &QuestEvent) -> usize {
        let mut delivered = 0;
        for sink in &self.sinks {
            match sink.send(event) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    event = event.event_type(),
                    sink = %sink.describe(),
                    "could not record activity: {}",
                    e
                ),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct FailingSink;

    impl ActivitySink for FailingSink {
        fn send(&self, _event: &QuestEvent) -> Result<(), QuestError> {
            Err(QuestError::NotFound("sink".into()))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    fn tracker_with_read() -> Tracker {
        let mut tracker = Tracker::new();
        tracker.add_goal(Goal::eternal("Read", 100).unwrap()).unwrap();
        tracker
    }

    #[test]
    fn event_recorded_uses_stored_name_and_score() {
        let mut tracker = tracker_with_read();
        let delta = tracker.record_event("read").unwrap();
        let event = QuestEvent::event_recorded(&tracker, "read", delta);

        match event {
            QuestEvent::EventRecorded {
                name,
                delta,
                score,
                completed,
                ..
            } => {
                assert_eq!(name, "Read");
                assert_eq!(delta, 100);
                assert_eq!(score, 100);
                assert!(!completed);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn event_json_is_tagged() {
        let goal = Goal::simple("Marathon", 1000).unwrap();
        let json = serde_json::to_string(&QuestEvent::goal_added(&goal)).unwrap();
        assert!(json.contains("\"event_type\":\"goal_added\""));
        assert!(json.contains("\"goal_type\":\"Simple\""));
    }

    #[test]
    fn log_sink_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("activity.jsonl");
        let sink = LogSink::new(&path);
        let tracker = tracker_with_read();

        sink.send(&QuestEvent::goal_added(&tracker.list_goals()[0]))
            .unwrap();
        sink.send(&QuestEvent::tracker_saved(&tracker, Path::new("t.json")))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("tracker_saved"));
    }

    #[test]
    fn log_sink_names_its_file() {
        let sink = LogSink::new("/tmp/quest/activity.jsonl");
        assert_eq!(sink.describe(), "activity log /tmp/quest/activity.jsonl");
    }

    #[test]
    fn dispatcher_keeps_going_past_failing_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(FailingSink));
        dispatcher.add_sink(Box::new(LogSink::new(&path)));

        let tracker = tracker_with_read();
        let event = QuestEvent::tracker_saved(&tracker, Path::new("t.json"));
        let delivered = dispatcher.dispatch(&event);

        assert_eq!(delivered, 1);
        assert!(fs::read_to_string(&path).unwrap().contains("tracker_saved"));
    }
}
