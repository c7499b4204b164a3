// record.rs — Progress subcommands: record, score.

use anyhow::Context;
use quest_goal::{QuestConfig, QuestEvent};

use super::Session;

pub fn record(name: &str, config: &QuestConfig) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;

    let delta = session
        .tracker
        .record_event(name)
        .with_context(|| format!("could not record an event for '{}'", name))?;
    session.save()?;
    session.notify(&QuestEvent::event_recorded(&session.tracker, name, delta));

    if delta > 0 {
        println!("Congratulations! You earned {} points.", delta);
    } else if delta < 0 {
        println!("You lost {} points.", -delta);
    } else {
        println!("That goal is already complete; no points changed.");
    }
    println!(
        "Total Score: {} (level {})",
        session.tracker.total_score(),
        session.tracker.level()
    );
    Ok(())
}

pub fn score(config: &QuestConfig) -> anyhow::Result<()> {
    let session = Session::open(config)?;
    println!("{}", session.tracker.total_score());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::goal::{add, AddCommands};
    use quest_goal::TrackerStore;
    use tempfile::TempDir;

    fn setup() -> (TempDir, QuestConfig) {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());
        add(
            &AddCommands::Checklist {
                name: "Temple".into(),
                points: 50,
                target: 2,
                bonus: 500,
            },
            &config,
        )
        .unwrap();
        (project, config)
    }

    #[test]
    fn record_accumulates_across_invocations() {
        let (_project, config) = setup();

        record("temple", &config).unwrap();
        record("Temple", &config).unwrap();
        record("TEMPLE", &config).unwrap();

        let tracker = TrackerStore::new(&config.data_file).load().unwrap();
        assert_eq!(tracker.total_score(), 600);
        assert!(tracker.goal("Temple").unwrap().is_completed());
    }

    #[test]
    fn record_unknown_goal_fails_without_saving() {
        let (_project, config) = setup();
        let before = std::fs::read_to_string(&config.data_file).unwrap();

        assert!(record("Nope", &config).is_err());
        assert_eq!(std::fs::read_to_string(&config.data_file).unwrap(), before);
    }

    #[test]
    fn failed_save_is_not_logged_as_activity() {
        let (_project, config) = setup();
        let logged = std::fs::read_to_string(&config.activity_log).unwrap();

        // A directory where the staged save would go makes the save fail.
        std::fs::create_dir(config.data_file.with_extension("json.tmp")).unwrap();

        assert!(record("Temple", &config).is_err());
        assert_eq!(std::fs::read_to_string(&config.activity_log).unwrap(), logged);
    }

    #[test]
    fn disabled_activity_log_is_not_written() {
        let project = TempDir::new().unwrap();
        let mut config = QuestConfig::for_project(project.path());
        config.activity_log_enabled = false;

        add(
            &AddCommands::Eternal {
                name: "Read".into(),
                points: 100,
            },
            &config,
        )
        .unwrap();
        record("Read", &config).unwrap();
        score(&config).unwrap();

        assert!(!config.activity_log.exists());
    }
}
