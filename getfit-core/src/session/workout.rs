use log::info;

use crate::db::models::Workout;
use crate::errors::{Field, SessionError};
use crate::session::Session;
use crate::validation::{validate_date, validate_non_empty, validate_positive_integer};

/// A workout whose fields have all passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutEntry {
    pub exercise: String,
    pub date: String,
    pub duration: i64,
    pub calories: i64,
}

impl WorkoutEntry {
    /// Checks raw form input field by field, stopping at the first bad one.
    pub fn parse(
        exercise: &str,
        date: &str,
        duration: &str,
        calories: &str,
    ) -> Result<Self, SessionError> {
        let exercise =
            validate_non_empty(exercise).map_err(SessionError::invalid(Field::Exercise))?;
        let date = validate_date(date).map_err(SessionError::invalid(Field::Date))?;
        let duration =
            validate_positive_integer(duration).map_err(SessionError::invalid(Field::Duration))?;
        let calories =
            validate_positive_integer(calories).map_err(SessionError::invalid(Field::Calories))?;

        Ok(Self {
            exercise: exercise.to_string(),
            date,
            duration,
            calories,
        })
    }
}

impl Session {
    /// Validate raw input and log it as a workout for this user.
    pub fn log_workout(
        &self,
        exercise: &str,
        date: &str,
        duration: &str,
        calories: &str,
    ) -> Result<i32, SessionError> {
        let entry = WorkoutEntry::parse(exercise, date, duration, calories)?;
        self.log_entry(&entry)
    }

    pub fn log_entry(&self, entry: &WorkoutEntry) -> Result<i32, SessionError> {
        let workout_id = self.store.log_workout(
            self.user_id(),
            &entry.exercise,
            &entry.date,
            entry.duration,
            entry.calories,
        )?;
        Ok(workout_id)
    }

    /// Delete every workout on `date`. Returns the number removed, possibly zero.
    pub fn delete_workouts(&self, date: &str) -> Result<usize, SessionError> {
        let date = validate_date(date).map_err(SessionError::invalid(Field::Date))?;
        let user_id = self
            .store
            .find_user_by_name(self.name())?
            .ok_or_else(|| SessionError::UserNotFound(self.name().to_string()))?;

        let deleted = self.store.delete_workouts(user_id, &date)?;
        info!(
            "Deleted {} workout(s) of {:?} on {}",
            deleted,
            self.name(),
            date
        );
        Ok(deleted)
    }

    pub fn workouts(&self) -> Result<Vec<Workout>, SessionError> {
        Ok(self.store.list_workouts(self.user_id())?)
    }
}
