use diesel::prelude::*;
use diesel::sql_types::Integer;
use log::debug;

use crate::db::Store;
use crate::db::models::{NewUser, NewWorkout, User, Workout, WorkoutStats};
use crate::db::schema::{users, workouts};
use crate::errors::StoreError;

const STATS_SQL: &str = "SELECT COUNT(*) AS count, \
     COALESCE(AVG(duration), 0.0) AS avg_duration, \
     COALESCE(AVG(calories), 0.0) AS avg_calories \
     FROM workouts WHERE user_id = ?";

impl Store {
    // Users

    /// Exact, case-sensitive lookup. Names are not unique in the schema; if
    /// several rows share a name the lowest id wins.
    pub fn find_user_by_name(&self, name: &str) -> Result<Option<i32>, StoreError> {
        let mut conn = self.conn()?;
        let user_id = users::table
            .filter(users::name.eq(name))
            .order(users::user_id.asc())
            .select(users::user_id)
            .first::<i32>(&mut conn)
            .optional()?;
        debug!("Lookup of user {:?} -> {:?}", name, user_id);
        Ok(user_id)
    }

    pub fn get_user(&self, user_id: i32) -> Result<Option<User>, StoreError> {
        let mut conn = self.conn()?;
        let user = users::table
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .optional()?;
        debug!("Fetched user {} -> found: {}", user_id, user.is_some());
        Ok(user)
    }

    /// Inserts a user and returns the generated id. Does not check whether the
    /// name is already taken.
    pub fn register_user(&self, name: &str) -> Result<i32, StoreError> {
        let mut conn = self.conn()?;
        let user_id = diesel::insert_into(users::table)
            .values(&NewUser { name })
            .returning(users::user_id)
            .get_result::<i32>(&mut conn)?;
        debug!("Inserted user {:?} with id {}", name, user_id);
        Ok(user_id)
    }

    // Workouts

    /// Inserts one workout and returns its id. Inputs are expected to be
    /// validated already; an unknown `user_id` is rejected by the foreign key.
    pub fn log_workout(
        &self,
        user_id: i32,
        exercise: &str,
        date: &str,
        duration: i64,
        calories: i64,
    ) -> Result<i32, StoreError> {
        let mut conn = self.conn()?;
        let workout_id = diesel::insert_into(workouts::table)
            .values(&NewWorkout {
                user_id,
                exercise,
                date,
                duration,
                calories,
            })
            .returning(workouts::workout_id)
            .get_result::<i32>(&mut conn)?;
        debug!(
            "Inserted workout {} for user {} on {}",
            workout_id, user_id, date
        );
        Ok(workout_id)
    }

    /// Deletes every workout of `user_id` on `date`. Returns how many rows went;
    /// zero is not an error.
    pub fn delete_workouts(&self, user_id: i32, date: &str) -> Result<usize, StoreError> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            workouts::table
                .filter(workouts::user_id.eq(user_id))
                .filter(workouts::date.eq(date)),
        )
        .execute(&mut conn)?;
        debug!(
            "Deleted {} workout(s) for user {} on {}",
            deleted, user_id, date
        );
        Ok(deleted)
    }

    pub fn aggregate_stats(&self, user_id: i32) -> Result<WorkoutStats, StoreError> {
        let mut conn = self.conn()?;
        let stats = diesel::sql_query(STATS_SQL)
            .bind::<Integer, _>(user_id)
            .get_result::<WorkoutStats>(&mut conn)?;
        debug!("Stats for user {}: {:?}", user_id, stats);
        Ok(stats)
    }

    /// All workouts of `user_id` in insertion order.
    pub fn list_workouts(&self, user_id: i32) -> Result<Vec<Workout>, StoreError> {
        let mut conn = self.conn()?;
        let rows = workouts::table
            .filter(workouts::user_id.eq(user_id))
            .order(workouts::workout_id.asc())
            .select(Workout::as_select())
            .load(&mut conn)?;
        debug!("Loaded {} workout(s) for user {}", rows.len(), user_id);
        Ok(rows)
    }
}
