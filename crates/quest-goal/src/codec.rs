// codec.rs — Flat record format for a Tracker.
//
// Encoding captures each goal's identity plus its progress counters.
// Decoding does not assign those counters directly: it builds a fresh goal
// and replays `record_event` until the stored progress is reached, so a
// loaded goal is indistinguishable from one that got there through use.
// Replay deltas are thrown away and the stored score is restored as-is.
//
// An unknown type tag or any inconsistent record aborts the whole decode.
// Nothing is handed back until every goal has been rebuilt.

use serde::{Deserialize, Serialize};

use crate::error::QuestError;
use crate::goal::{Goal, GoalProgress, GoalType};
use crate::tracker::Tracker;

/// Top-level persisted record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerRecord {
    #[serde(alias = "Score")]
    pub score: i64,

    /// Derived from score; written for readability, ignored on load.
    #[serde(default, alias = "Level", skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,

    #[serde(default, alias = "Goals")]
    pub goals: Vec<GoalRecord>,
}

/// One persisted goal. The checklist fields are only present for
/// checklist goals.
///
/// The PascalCase aliases read files written by the older program.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    /// Kept as a raw string so an unrecognised tag surfaces as
    /// `UnknownGoalType` rather than a generic parse failure.
    #[serde(rename = "type", alias = "Type")]
    pub kind: String,

    #[serde(alias = "Name")]
    pub name: String,

    #[serde(alias = "Points")]
    pub points: i64,

    #[serde(default, alias = "Completed")]
    pub completed: bool,

    #[serde(default, alias = "TargetCount", skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,

    #[serde(default, alias = "CurrentCount", skip_serializing_if = "Option::is_none")]
    pub current_count: Option<u32>,

    #[serde(default, alias = "CompletionBonus", skip_serializing_if = "Option::is_none")]
    pub completion_bonus: Option<i64>,
}

impl From<&Goal> for GoalRecord {
    fn from(goal: &Goal) -> Self {
        let mut record = GoalRecord {
            kind: goal.goal_type().to_string(),
            name: goal.name().to_string(),
            points: goal.points(),
            completed: goal.is_completed(),
            target_count: None,
            current_count: None,
            completion_bonus: None,
        };
        if let GoalProgress::Checklist {
            target_count,
            current_count,
            completion_bonus,
        } = *goal.progress()
        {
            record.target_count = Some(target_count);
            record.current_count = Some(current_count);
            record.completion_bonus = Some(completion_bonus);
        }
        record
    }
}

/// Snapshot a tracker into its flat record.
pub fn encode(tracker: &Tracker) -> TrackerRecord {
    TrackerRecord {
        score: tracker.total_score(),
        level: Some(tracker.level()),
        goals: tracker.list_goals().iter().map(GoalRecord::from).collect(),
    }
}

/// Rebuild a tracker from a record.
pub fn decode(record: TrackerRecord) -> Result<Tracker, QuestError> {
    let goals = record
        .goals
        .iter()
        .map(decode_goal)
        .collect::<Result<Vec<_>, _>>()?;
    Tracker::from_parts(goals, record.score)
}

/// Rebuild one goal by construction plus replay.
pub fn decode_goal(record: &GoalRecord) -> Result<Goal, QuestError> {
    let kind: GoalType = record.kind.parse()?;
    let mut goal = construct(kind, record).map_err(|err| match err {
        QuestError::InvalidGoal { .. } => inconsistent(record, &err.to_string()),
        other => other,
    })?;

    let replays = match kind {
        GoalType::Simple | GoalType::Negative => u32::from(record.completed),
        GoalType::Eternal => 0,
        GoalType::Checklist => {
            let current = record.current_count.unwrap_or(0);
            let target = record.target_count.unwrap_or(0);
            if current > target {
                return Err(inconsistent(
                    record,
                    &format!("currentCount {} exceeds targetCount {}", current, target),
                ));
            }
            current
        }
    };
    for _ in 0..replays {
        goal.record_event();
    }

    if goal.is_completed() != record.completed {
        return Err(inconsistent(
            record,
            &format!(
                "stored completed={} but replay gives completed={}",
                record.completed,
                goal.is_completed()
            ),
        ));
    }
    Ok(goal)
}

/// Build the goal in its initial state. Construction bounds `targetCount`,
/// which in turn bounds the replay.
fn construct(kind: GoalType, record: &GoalRecord) -> Result<Goal, QuestError> {
    match kind {
        GoalType::Simple => Goal::simple(&record.name, record.points),
        GoalType::Eternal => Goal::eternal(&record.name, record.points),
        GoalType::Negative => Goal::negative(&record.name, record.points),
        GoalType::Checklist => {
            let target_count = record
                .target_count
                .ok_or_else(|| inconsistent(record, "checklist goal is missing targetCount"))?;
            Goal::checklist(
                &record.name,
                record.points,
                target_count,
                record.completion_bonus.unwrap_or(0),
            )
        }
    }
}

/// Encode straight to pretty-printed JSON.
pub fn to_json(tracker: &Tracker) -> Result<String, QuestError> {
    Ok(serde_json::to_string_pretty(&encode(tracker))?)
}

/// Decode straight from JSON.
pub fn from_json(json: &str) -> Result<Tracker, QuestError> {
    let record: TrackerRecord = serde_json::from_str(json)?;
    decode(record)
}

fn inconsistent(record: &GoalRecord, reason: &str) -> QuestError {
    QuestError::InconsistentRecord {
        name: record.name.clone(),
        reason: reason.to_string(),
    }
}
