use crate::analysis::Analysis;
use crate::db::models::WorkoutStats;
use crate::errors::SessionError;
use crate::session::Session;

impl Session {
    pub fn stats(&self) -> Result<WorkoutStats, SessionError> {
        Ok(self.store.aggregate_stats(self.user_id())?)
    }

    /// Chart data for this user's workouts.
    pub fn analysis(&self) -> Result<Analysis, SessionError> {
        let workouts = self.workouts()?;
        Ok(Analysis::from_workouts(&workouts))
    }
}
