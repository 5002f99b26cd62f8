//! Chart series derived from a user's workouts.

use serde::Serialize;
use std::collections::HashMap;

use crate::db::models::Workout;
use crate::validation::parse_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCalories {
    pub date: String,
    pub calories: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseCalories {
    pub exercise: String,
    pub avg_calories: f64,
}

/// Both series shown on the analysis screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub calories_per_day: Vec<DailyCalories>,
    pub avg_calories_per_exercise: Vec<ExerciseCalories>,
}

impl Analysis {
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        Self {
            calories_per_day: calories_per_day(workouts),
            avg_calories_per_exercise: avg_calories_per_exercise(workouts),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calories_per_day.is_empty()
    }
}

/// Total calories per distinct date, oldest first.
///
/// Dates that do not parse as `DD-MM-YYYY` sort after all valid ones.
pub fn calories_per_day(workouts: &[Workout]) -> Vec<DailyCalories> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for workout in workouts {
        let total = totals.entry(workout.date.as_str()).or_insert(0);
        *total = total.saturating_add(workout.calories);
    }

    let mut days: Vec<DailyCalories> = totals
        .into_iter()
        .map(|(date, calories)| DailyCalories {
            date: date.to_string(),
            calories,
        })
        .collect();
    days.sort_by_cached_key(|day| {
        let parsed = parse_date(&day.date).ok();
        (parsed.is_none(), parsed, day.date.clone())
    });
    days
}

/// Mean calories per exercise label, in order of first appearance.
pub fn avg_calories_per_exercise(workouts: &[Workout]) -> Vec<ExerciseCalories> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, i64, u32)> = Vec::new();
    for workout in workouts {
        let slot = *index.entry(workout.exercise.as_str()).or_insert_with(|| {
            sums.push((workout.exercise.as_str(), 0, 0));
            sums.len() - 1
        });
        sums[slot].1 = sums[slot].1.saturating_add(workout.calories);
        sums[slot].2 += 1;
    }

    sums.into_iter()
        .map(|(exercise, total, count)| ExerciseCalories {
            exercise: exercise.to_string(),
            avg_calories: total as f64 / f64::from(count),
        })
        .collect()
}
