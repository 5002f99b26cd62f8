mod common;

use common::TestHarness;
use getfit::config::StoreConfig;
use getfit::db::Store;
use getfit::db::models::WorkoutStats;
use getfit::errors::StoreError;

#[test]
fn registered_user_is_found_by_name() {
    let harness = TestHarness::new();
    let uid = harness.store.register_user("Alice").unwrap();

    assert_eq!(harness.store.find_user_by_name("Alice").unwrap(), Some(uid));
    let user = harness.store.get_user(uid).unwrap().expect("user row");
    assert_eq!(user.name, "Alice");
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    let (harness, _) = TestHarness::with_user("Alice");

    assert_eq!(harness.store.find_user_by_name("alice").unwrap(), None);
    assert_eq!(harness.store.find_user_by_name("Alice ").unwrap(), None);
    assert_eq!(harness.store.find_user_by_name("Bob").unwrap(), None);
    assert_eq!(harness.store.get_user(9999).unwrap(), None);
}

#[test]
fn duplicate_names_resolve_to_first_registered() {
    let harness = TestHarness::new();
    let first = harness.store.register_user("Sam").unwrap();
    let second = harness.store.register_user("Sam").unwrap();

    assert_ne!(first, second);
    assert_eq!(harness.store.find_user_by_name("Sam").unwrap(), Some(first));
}

#[test]
fn stats_average_over_logged_workouts() {
    let (harness, uid) = TestHarness::with_user("Alice");
    harness.log(uid, "Run", "01-01-2024", 30, 300);
    harness.log(uid, "Run", "02-01-2024", 20, 200);

    let stats = harness.store.aggregate_stats(uid).unwrap();
    assert_eq!(
        stats,
        WorkoutStats {
            count: 2,
            avg_duration: 25.0,
            avg_calories: 250.0,
        }
    );
}

#[test]
fn stats_without_workouts_are_zero() {
    let (harness, uid) = TestHarness::with_user("Idle");

    assert_eq!(harness.store.aggregate_stats(uid).unwrap(), WorkoutStats::EMPTY);
}

#[test]
fn stats_only_count_the_given_user() {
    let (harness, alice) = TestHarness::with_user("Alice");
    let bob = harness.store.register_user("Bob").unwrap();
    harness.log(alice, "Run", "01-01-2024", 30, 300);
    harness.log(bob, "Swim", "01-01-2024", 90, 900);

    let stats = harness.store.aggregate_stats(alice).unwrap();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.avg_calories, 300.0);
}

#[test]
fn delete_removes_only_matching_date() {
    let (harness, uid) = TestHarness::with_user("Alice");
    harness.log(uid, "Run", "01-01-2024", 30, 300);
    harness.log(uid, "Run", "02-01-2024", 20, 200);

    let deleted = harness.store.delete_workouts(uid, "01-01-2024").unwrap();
    assert_eq!(deleted, 1);

    let remaining = harness.store.list_workouts(uid).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].date, "02-01-2024");
}

#[test]
fn delete_takes_every_workout_on_that_date() {
    let (harness, uid) = TestHarness::with_user("Alice");
    let other = harness.store.register_user("Bob").unwrap();
    harness.log(uid, "Run", "05-05-2024", 30, 300);
    harness.log(uid, "Lift", "05-05-2024", 45, 250);
    harness.log(other, "Run", "05-05-2024", 10, 100);

    assert_eq!(harness.store.delete_workouts(uid, "05-05-2024").unwrap(), 2);
    assert!(harness.store.list_workouts(uid).unwrap().is_empty());
    assert_eq!(harness.store.list_workouts(other).unwrap().len(), 1);
}

#[test]
fn delete_without_match_is_a_no_op() {
    let (harness, uid) = TestHarness::with_user("Alice");
    harness.log(uid, "Run", "01-01-2024", 30, 300);

    assert_eq!(harness.store.delete_workouts(uid, "31-12-1999").unwrap(), 0);
    assert_eq!(harness.store.list_workouts(uid).unwrap().len(), 1);
}

#[test]
fn workouts_list_in_insertion_order() {
    let (harness, uid) = TestHarness::with_user("Alice");
    harness.log(uid, "Swim", "03-01-2024", 40, 350);
    harness.log(uid, "Run", "01-01-2024", 30, 300);
    harness.log(uid, "Bike", "02-01-2024", 60, 500);

    let workouts = harness.store.list_workouts(uid).unwrap();
    let exercises: Vec<&str> = workouts.iter().map(|w| w.exercise.as_str()).collect();
    assert_eq!(exercises, vec!["Swim", "Run", "Bike"]);
    assert!(workouts.windows(2).all(|w| w[0].workout_id < w[1].workout_id));
    assert_eq!(workouts[1].to_string(), "Run on 01-01-2024: 30 min, 300 kcal");
}

#[test]
fn workout_for_unknown_user_is_rejected() {
    let harness = TestHarness::new();

    let err = harness
        .store
        .log_workout(4242, "Run", "01-01-2024", 30, 300)
        .unwrap_err();
    assert!(matches!(err, StoreError::Query(_)), "got {err:?}");
}

#[test]
fn initialize_is_idempotent_and_keeps_data() {
    let (harness, uid) = TestHarness::with_user("Alice");
    harness.log(uid, "Run", "01-01-2024", 30, 300);

    harness.store.initialize().unwrap();
    harness.store.initialize().unwrap();

    let reopened = Store::open_and_initialize(StoreConfig::new(
        harness.database_path().to_string_lossy(),
    ))
    .unwrap();
    assert_eq!(reopened.find_user_by_name("Alice").unwrap(), Some(uid));
    assert_eq!(reopened.list_workouts(uid).unwrap().len(), 1);
}

#[test]
fn in_memory_store_keeps_state_between_calls() {
    let store = Store::open_and_initialize(StoreConfig::in_memory()).unwrap();
    let uid = store.register_user("Ephemeral").unwrap();
    store
        .log_workout(uid, "Walk", "10-10-2024", 15, 60)
        .unwrap();

    assert_eq!(store.find_user_by_name("Ephemeral").unwrap(), Some(uid));
    assert_eq!(store.aggregate_stats(uid).unwrap().count, 1);
}
