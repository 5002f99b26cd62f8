use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double};
use serde::Serialize;
use std::fmt;

use crate::db::schema::{users, workouts};

// User models
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub user_id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub name: &'a str,
}

// Workout models
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = workouts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Workout {
    pub workout_id: i32,
    pub user_id: i32,
    pub exercise: String,
    /// `DD-MM-YYYY`
    pub date: String,
    /// Minutes.
    pub duration: i64,
    pub calories: i64,
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {}: {} min, {} kcal",
            self.exercise, self.date, self.duration, self.calories
        )
    }
}

#[derive(Insertable)]
#[diesel(table_name = workouts)]
pub struct NewWorkout<'a> {
    pub user_id: i32,
    pub exercise: &'a str,
    pub date: &'a str,
    pub duration: i64,
    pub calories: i64,
}

/// Count and means over one user's workouts. Means are `0.0` when there are none.
#[derive(QueryableByName, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkoutStats {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
    #[diesel(sql_type = Double)]
    pub avg_duration: f64,
    #[diesel(sql_type = Double)]
    pub avg_calories: f64,
}

impl WorkoutStats {
    pub const EMPTY: WorkoutStats = WorkoutStats {
        count: 0,
        avg_duration: 0.0,
        avg_calories: 0.0,
    };
}
