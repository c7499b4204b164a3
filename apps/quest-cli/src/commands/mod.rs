// mod.rs — Shared plumbing for quest subcommands.

pub mod goal;
pub mod record;

use quest_goal::{EventDispatcher, LogSink, QuestConfig, QuestEvent, Tracker, TrackerStore};

/// One CLI invocation: the tracker as loaded from disk, plus where to put
/// it back and who to tell about it.
pub struct Session {
    pub store: TrackerStore,
    pub tracker: Tracker,
    dispatcher: EventDispatcher,
}

impl Session {
    /// Load the project's tracker, starting empty on first run.
    pub fn open(config: &QuestConfig) -> anyhow::Result<Self> {
        let store = TrackerStore::new(&config.data_file);
        let tracker = store.load_or_default()?;

        let mut dispatcher = EventDispatcher::new();
        if config.activity_log_enabled {
            dispatcher.add_sink(Box::new(LogSink::new(&config.activity_log)));
        }

        Ok(Self {
            store,
            tracker,
            dispatcher,
        })
    }

    pub fn notify(&self, event: &QuestEvent) {
        self.dispatcher.dispatch(event);
    }

    /// Write the tracker back to disk. Activity for an operation is only
    /// dispatched once this has succeeded.
    pub fn save(&self) -> anyhow::Result<()> {
        self.store.save(&self.tracker)?;
        self.notify(&QuestEvent::tracker_saved(&self.tracker, self.store.path()));
        Ok(())
    }
}
