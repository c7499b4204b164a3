// goal.rs — Goal subcommands: add, list.

use anyhow::Context;
use clap::Subcommand;
use quest_goal::{Goal, QuestConfig, QuestEvent};

use super::Session;

#[derive(Subcommand)]
pub enum AddCommands {
    /// A goal completed by a single event.
    Simple {
        /// Goal name (e.g., "Run a marathon").
        name: String,
        /// Points awarded on completion.
        points: u32,
    },
    /// A goal that is never finished and pays out every time.
    Eternal {
        /// Goal name (e.g., "Read scriptures").
        name: String,
        /// Points awarded per event.
        points: u32,
    },
    /// A goal that must be recorded a number of times.
    Checklist {
        /// Goal name (e.g., "Attend the temple").
        name: String,
        /// Points awarded per event.
        points: u32,
        /// Number of events needed to finish.
        #[arg(long)]
        target: u32,
        /// Extra points awarded once, on finishing.
        #[arg(long, default_value = "0")]
        bonus: u32,
    },
    /// A bad habit: recording it deducts points once.
    Negative {
        /// Goal name (e.g., "Skip junk food").
        name: String,
        /// Points deducted.
        points: u32,
    },
}

pub fn add(cmd: &AddCommands, config: &QuestConfig) -> anyhow::Result<()> {
    let goal = build_goal(cmd)?;
    let mut session = Session::open(config)?;

    let event = QuestEvent::goal_added(&goal);
    let description = goal.to_string();
    session
        .tracker
        .add_goal(goal)
        .context("could not add goal")?;
    session.save()?;
    session.notify(&event);

    println!("Added: {}", description);
    Ok(())
}

fn build_goal(cmd: &AddCommands) -> anyhow::Result<Goal> {
    let goal = match cmd {
        AddCommands::Simple { name, points } => Goal::simple(name, i64::from(*points))?,
        AddCommands::Eternal { name, points } => Goal::eternal(name, i64::from(*points))?,
        AddCommands::Checklist {
            name,
            points,
            target,
            bonus,
        } => Goal::checklist(name, i64::from(*points), *target, i64::from(*bonus))?,
        AddCommands::Negative { name, points } => Goal::negative(name, i64::from(*points))?,
    };
    Ok(goal)
}

pub fn list(config: &QuestConfig) -> anyhow::Result<()> {
    let session = Session::open(config)?;
    let tracker = &session.tracker;

    println!("Level: {}", tracker.level());
    if tracker.list_goals().is_empty() {
        println!("No goals yet.");
    } else {
        println!("Goals:");
        for (i, goal) in tracker.list_goals().iter().enumerate() {
            println!("{:>3}. {}", i + 1, goal);
        }
    }
    println!("Total Score: {}", tracker.total_score());

    Ok(())
}
