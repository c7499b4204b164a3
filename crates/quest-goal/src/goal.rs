// goal.rs — Goal: one trackable objective and its completion rule.
//
// Every goal carries a name and a point value. What happens when an event
// is recorded depends on the variant:
//   Simple    → completes on the first event, awards points once
//   Eternal   → never completes, awards points every time
//   Checklist → awards points per event, plus a bonus on reaching the target
//   Negative  → completes on the first event, deducts points once
//
// Identity (name, points, variant parameters) is fixed at construction.
// Only the progress fields move, and only through `record_event`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuestError;

/// Largest `points` or `completion_bonus` a goal accepts. Keeps every
/// single-event delta far inside `i64`.
pub const MAX_POINTS: i64 = 1_000_000_000;

/// Largest checklist target. Bounds the replay done when loading.
pub const MAX_TARGET_COUNT: u32 = 100_000;

/// The four goal variants, as tagged in persisted records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GoalType {
    Simple,
    Eternal,
    Checklist,
    Negative,
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalType::Simple => write!(f, "Simple"),
            GoalType::Eternal => write!(f, "Eternal"),
            GoalType::Checklist => write!(f, "Checklist"),
            GoalType::Negative => write!(f, "Negative"),
        }
    }
}

impl FromStr for GoalType {
    type Err = QuestError;

    /// Parse a type tag. Files written by the older program used a
    /// `Goal` suffix ("SimpleGoal"), which is accepted as well.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.strip_suffix("Goal").unwrap_or(tag) {
            "Simple" => Ok(GoalType::Simple),
            "Eternal" => Ok(GoalType::Eternal),
            "Checklist" => Ok(GoalType::Checklist),
            "Negative" => Ok(GoalType::Negative),
            _ => Err(QuestError::UnknownGoalType(tag.to_string())),
        }
    }
}

/// Variant-specific progress state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalProgress {
    Simple {
        completed: bool,
    },
    Eternal,
    /// Invariant: `1 <= target_count`, `current_count <= target_count`,
    /// and the goal is completed exactly when the two are equal.
    Checklist {
        target_count: u32,
        current_count: u32,
        completion_bonus: i64,
    },
    Negative {
        completed: bool,
    },
}

/// A trackable goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    name: String,
    points: i64,
    progress: GoalProgress,
}

impl Goal {
    /// A goal that completes on its first event.
    pub fn simple(name: impl Into<String>, points: i64) -> Result<Self, QuestError> {
        Self::build(name, points, GoalProgress::Simple { completed: false })
    }

    /// A goal that never completes and pays out on every event.
    pub fn eternal(name: impl Into<String>, points: i64) -> Result<Self, QuestError> {
        Self::build(name, points, GoalProgress::Eternal)
    }

    /// A goal that must be recorded `target_count` times. Each event pays
    /// `points`; the final one also pays `completion_bonus`.
    pub fn checklist(
        name: impl Into<String>,
        points: i64,
        target_count: u32,
        completion_bonus: i64,
    ) -> Result<Self, QuestError> {
        if target_count == 0 || target_count > MAX_TARGET_COUNT {
            return Err(QuestError::InvalidGoal {
                field: "target_count",
                reason: format!(
                    "must be between 1 and {} (got {})",
                    MAX_TARGET_COUNT, target_count
                ),
            });
        }
        check_points("completion_bonus", completion_bonus)?;
        Self::build(
            name,
            points,
            GoalProgress::Checklist {
                target_count,
                current_count: 0,
                completion_bonus,
            },
        )
    }

    /// A bad-habit goal: the first event deducts `points`.
    /// `points` is stored positive; the sign comes from the variant.
    pub fn negative(name: impl Into<String>, points: i64) -> Result<Self, QuestError> {
        Self::build(name, points, GoalProgress::Negative { completed: false })
    }

    fn build(
        name: impl Into<String>,
        points: i64,
        progress: GoalProgress,
    ) -> Result<Self, QuestError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(QuestError::InvalidGoal {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        check_points("points", points)?;
        Ok(Self {
            name,
            points,
            progress,
        })
    }

    /// Record one event against this goal and return the point delta.
    ///
    /// Completed goals return 0 and are left untouched, so repeated
    /// calls after completion are idempotent.
    pub fn record_event(&mut self) -> i64 {
        match &mut self.progress {
            GoalProgress::Simple { completed } => {
                if *completed {
                    return 0;
                }
                *completed = true;
                self.points
            }
            GoalProgress::Eternal => self.points,
            GoalProgress::Checklist {
                target_count,
                current_count,
                completion_bonus,
            } => {
                if *current_count >= *target_count {
                    return 0;
                }
                *current_count += 1;
                if *current_count >= *target_count {
                    self.points + *completion_bonus
                } else {
                    self.points
                }
            }
            GoalProgress::Negative { completed } => {
                if *completed {
                    return 0;
                }
                *completed = true;
                -self.points
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored (always non-negative) point value.
    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn progress(&self) -> &GoalProgress {
        &self.progress
    }

    pub fn goal_type(&self) -> GoalType {
        match self.progress {
            GoalProgress::Simple { .. } => GoalType::Simple,
            GoalProgress::Eternal => GoalType::Eternal,
            GoalProgress::Checklist { .. } => GoalType::Checklist,
            GoalProgress::Negative { .. } => GoalType::Negative,
        }
    }

    /// Eternal goals are never completed.
    pub fn is_completed(&self) -> bool {
        match self.progress {
            GoalProgress::Simple { completed } | GoalProgress::Negative { completed } => completed,
            GoalProgress::Eternal => false,
            GoalProgress::Checklist {
                target_count,
                current_count,
                ..
            } => current_count >= target_count,
        }
    }

    /// Case-insensitive name comparison used for lookups.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

fn check_points(field: &'static str, value: i64) -> Result<(), QuestError> {
    if !(0..=MAX_POINTS).contains(&value) {
        return Err(QuestError::InvalidGoal {
            field,
            reason: format!("must be between 0 and {} (got {})", MAX_POINTS, value),
        });
    }
    Ok(())
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_completed() { "[X]" } else { "[ ]" };
        match &self.progress {
            GoalProgress::Simple { .. } => {
                write!(f, "{} {} - Points: {}", check, self.name, self.points)
            }
            GoalProgress::Eternal => {
                write!(f, "[∞] {} - Points per event: {}", self.name, self.points)
            }
            GoalProgress::Checklist {
                target_count,
                current_count,
                completion_bonus,
            } => write!(
                f,
                "{} {} - Completed {}/{} - Points per event: {}, Completion Bonus: {}",
                check, self.name, current_count, target_count, self.points, completion_bonus
            ),
            GoalProgress::Negative { .. } => {
                write!(f, "{} {} - Lose Points: {}", check, self.name, self.points)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_awards_once_then_stays_completed() {
        let mut goal = Goal::simple("Run a marathon", 1000).unwrap();
        assert!(!goal.is_completed());
        assert_eq!(goal.record_event(), 1000);
        assert!(goal.is_completed());

        let after_first = goal.clone();
        for _ in 0..5 {
            assert_eq!(goal.record_event(), 0);
        }
        assert_eq!(goal, after_first);
    }

    #[test]
    fn negative_deducts_once() {
        let mut goal = Goal::negative("Junk food", 200).unwrap();
        assert_eq!(goal.points(), 200);
        assert_eq!(goal.record_event(), -200);
        assert!(goal.is_completed());
        assert_eq!(goal.record_event(), 0);
        assert_eq!(goal.record_event(), 0);
    }

    #[test]
    fn eternal_never_completes() {
        let mut goal = Goal::eternal("Read", 100).unwrap();
        for _ in 0..50 {
            assert_eq!(goal.record_event(), 100);
            assert!(!goal.is_completed());
        }
    }

    #[test]
    fn checklist_pays_bonus_on_target() {
        let mut goal = Goal::checklist("Gym", 10, 3, 50).unwrap();
        assert_eq!(goal.record_event(), 10);
        assert_eq!(goal.record_event(), 10);
        assert!(!goal.is_completed());
        assert_eq!(goal.record_event(), 60);
        assert!(goal.is_completed());
        assert_eq!(goal.record_event(), 0);
        assert_eq!(
            goal.progress(),
            &GoalProgress::Checklist {
                target_count: 3,
                current_count: 3,
                completion_bonus: 50,
            }
        );
    }

    #[test]
    fn checklist_with_single_target_completes_immediately() {
        let mut goal = Goal::checklist("One shot", 5, 1, 20).unwrap();
        assert_eq!(goal.record_event(), 25);
        assert!(goal.is_completed());
    }

    #[test]
    fn construction_is_validated() {
        assert!(matches!(
            Goal::simple("   ", 10),
            Err(QuestError::InvalidGoal { field: "name", .. })
        ));
        assert!(matches!(
            Goal::eternal("Read", -1),
            Err(QuestError::InvalidGoal { field: "points", .. })
        ));
        assert!(matches!(
            Goal::checklist("Gym", 10, 0, 50),
            Err(QuestError::InvalidGoal {
                field: "target_count",
                ..
            })
        ));
        assert!(matches!(
            Goal::checklist("Gym", 10, 3, -5),
            Err(QuestError::InvalidGoal {
                field: "completion_bonus",
                ..
            })
        ));
    }

    #[test]
    fn magnitudes_are_bounded() {
        assert!(matches!(
            Goal::eternal("Read", i64::MAX),
            Err(QuestError::InvalidGoal { field: "points", .. })
        ));
        assert!(matches!(
            Goal::simple("Read", MAX_POINTS + 1),
            Err(QuestError::InvalidGoal { field: "points", .. })
        ));
        assert!(matches!(
            Goal::checklist("Big", MAX_POINTS, 1, i64::MAX),
            Err(QuestError::InvalidGoal {
                field: "completion_bonus",
                ..
            })
        ));
        assert!(matches!(
            Goal::checklist("Long", 1, u32::MAX, 0),
            Err(QuestError::InvalidGoal {
                field: "target_count",
                ..
            })
        ));
    }

    #[test]
    fn largest_goal_pays_without_overflow() {
        let mut goal = Goal::checklist("Big", MAX_POINTS, MAX_TARGET_COUNT, MAX_POINTS).unwrap();
        for _ in 1..MAX_TARGET_COUNT {
            assert_eq!(goal.record_event(), MAX_POINTS);
        }
        assert_eq!(goal.record_event(), 2 * MAX_POINTS);
        assert!(goal.is_completed());

        let mut bad_habit = Goal::negative("Big", MAX_POINTS).unwrap();
        assert_eq!(bad_habit.record_event(), -MAX_POINTS);
    }

    #[test]
    fn zero_points_is_allowed() {
        let mut goal = Goal::simple("Free", 0).unwrap();
        assert_eq!(goal.record_event(), 0);
        assert!(goal.is_completed());
    }

    #[test]
    fn name_matching_ignores_case() {
        let goal = Goal::eternal("Read Scriptures", 100).unwrap();
        assert!(goal.matches_name("read scriptures"));
        assert!(goal.matches_name("READ SCRIPTURES"));
        assert!(!goal.matches_name("Read"));
    }

    #[test]
    fn type_tags_parse_short_and_legacy_forms() {
        assert_eq!("Checklist".parse::<GoalType>().unwrap(), GoalType::Checklist);
        assert_eq!("NegativeGoal".parse::<GoalType>().unwrap(), GoalType::Negative);
        assert!(matches!(
            "ProgressGoal".parse::<GoalType>(),
            Err(QuestError::UnknownGoalType(tag)) if tag == "ProgressGoal"
        ));
        assert_eq!(GoalType::Eternal.to_string(), "Eternal");
    }

    #[test]
    fn display_reflects_progress() {
        let mut goal = Goal::checklist("Temple", 50, 10, 500).unwrap();
        goal.record_event();
        goal.record_event();
        let text = goal.to_string();
        assert!(text.starts_with("[ ] Temple"));
        assert!(text.contains("Completed 2/10"));

        let mut simple = Goal::simple("Marathon", 1000).unwrap();
        simple.record_event();
        assert!(simple.to_string().starts_with("[X]"));
        assert!(Goal::eternal("Read", 1).unwrap().to_string().starts_with("[∞]"));
    }
}
