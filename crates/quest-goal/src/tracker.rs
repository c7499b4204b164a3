// tracker.rs — Tracker: the goal list and the running score for one user.
//
// The score is an accumulator. It is the sum of every delta ever returned
// by `record_event`, never recomputed from goal state, so it survives
// goals that were completed long ago and deductions alike. It saturates
// at the `i64` limits instead of wrapping.

use crate::error::QuestError;
use crate::goal::Goal;

/// Points needed per level.
pub const POINTS_PER_LEVEL: i64 = 1000;

/// Owns an ordered list of goals and the cumulative score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracker {
    goals: Vec<Goal>,
    score: i64,
}

impl Tracker {
    /// An empty tracker with a score of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker from already-reconstructed goals and a stored
    /// score. Names must still be unique.
    pub(crate) fn from_parts(goals: Vec<Goal>, score: i64) -> Result<Self, QuestError> {
        let mut tracker = Self::new();
        for goal in goals {
            tracker.add_goal(goal)?;
        }
        tracker.score = score;
        Ok(tracker)
    }

    /// Append a goal. Fails if the name is taken (ignoring case), in which
    /// case the goal list is left as it was.
    pub fn add_goal(&mut self, goal: Goal) -> Result<(), QuestError> {
        if self.goal(goal.name()).is_some() {
            return Err(QuestError::DuplicateName(goal.name().to_string()));
        }
        tracing::debug!(goal = goal.name(), kind = %goal.goal_type(), "goal added");
        self.goals.push(goal);
        Ok(())
    }

    /// Record an event against the named goal, add the delta to the score
    /// and return it. An unknown name changes nothing.
    pub fn record_event(&mut self, name: &str) -> Result<i64, QuestError> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.matches_name(name))
            .ok_or_else(|| QuestError::NotFound(name.to_string()))?;

        let delta = goal.record_event();
        self.score = self.score.saturating_add(delta);
        tracing::debug!(
            goal = goal.name(),
            delta,
            score = self.score,
            completed = goal.is_completed(),
            "event recorded"
        );
        Ok(delta)
    }

    /// Look up a goal by name, ignoring case.
    pub fn goal(&self, name: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.matches_name(name))
    }

    /// All goals in insertion order.
    pub fn list_goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn total_score(&self) -> i64 {
        self.score
    }

    /// One level per thousand points, starting at 1. Scores at or
    /// below zero stay on level 1.
    pub fn level(&self) -> i64 {
        if self.score <= 0 {
            1
        } else {
            self.score / POINTS_PER_LEVEL + 1
        }
    }
}
