diesel::table! {
    users (user_id) {
        user_id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    workouts (workout_id) {
        workout_id -> Integer,
        user_id -> Integer,
        exercise -> Text,
        date -> Text,
        duration -> BigInt,
        calories -> BigInt,
    }
}

diesel::joinable!(workouts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, workouts);
