use super::*;
#[cfg(feature = "live-db-tests")]
use crate::state::test_helpers;
#[cfg(feature = "live-db-tests")]
use time::macros::date;

#[test]
fn habit_row_serializes_id_as_underscore_id() {
    let row = HabitRow { id: Uuid::nil(), title: "Read".into() };
    let value = serde_json::to_value(&row).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"_id": "00000000-0000-0000-0000-000000000000", "title": "Read"})
    );
}

#[test]
fn today_utc_matches_current_utc_date() {
    let before = OffsetDateTime::now_utc().date();
    let today = today_utc();
    let after = OffsetDateTime::now_utc().date();
    assert!(today == before || today == after);
}

#[test]
fn habit_error_display_mentions_database() {
    let err = HabitError::Database(sqlx::Error::RowNotFound);
    assert!(err.to_string().starts_with("database error"));
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
async fn log_count(pool: &PgPool, habit_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM habit_logs WHERE habit_id = $1")
        .bind(habit_id)
        .fetch_one(pool)
        .await
        .expect("count should succeed")
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn add_then_list_returns_habit() {
    let pool = test_helpers::integration_pool().await;
    let day = date!(2026 - 10 - 19);

    let read = add_habit(&pool, "Read", day).await.expect("add should succeed");
    let run = add_habit(&pool, "Run", day).await.expect("add should succeed");

    let listed = list_habits(&pool).await.expect("list should succeed");
    assert_eq!(listed, vec![read, run]);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn duplicate_and_empty_titles_are_accepted() {
    let pool = test_helpers::integration_pool().await;
    let day = date!(2026 - 10 - 19);

    add_habit(&pool, "Read", day).await.expect("first");
    add_habit(&pool, "Read", day).await.expect("duplicate");
    add_habit(&pool, "", day).await.expect("empty");

    assert_eq!(list_habits(&pool).await.expect("list").len(), 3);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn toggle_twice_restores_original_status() {
    let pool = test_helpers::integration_pool().await;
    let day = date!(2026 - 10 - 19);
    let habit = add_habit(&pool, "Read", day).await.expect("add");

    assert!(toggle_habit(&pool, habit.id, day).await.expect("first toggle"));
    assert!(!toggle_habit(&pool, habit.id, day).await.expect("second toggle"));
    assert!(toggle_habit(&pool, habit.id, day).await.expect("third toggle"));
    assert_eq!(log_count(&pool, habit.id).await, 1, "toggles must reuse the day's log");
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn toggles_on_different_days_create_separate_logs() {
    let pool = test_helpers::integration_pool().await;
    let habit = add_habit(&pool, "Read", date!(2026 - 10 - 18)).await.expect("add");

    assert!(toggle_habit(&pool, habit.id, date!(2026 - 10 - 18)).await.expect("day one"));
    assert!(toggle_habit(&pool, habit.id, date!(2026 - 10 - 19)).await.expect("day two"));
    assert_eq!(log_count(&pool, habit.id).await, 2);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn toggle_unknown_habit_still_creates_log() {
    let pool = test_helpers::integration_pool().await;
    let ghost = Uuid::new_v4();

    assert!(toggle_habit(&pool, ghost, date!(2026 - 10 - 19)).await.expect("toggle"));
    assert_eq!(log_count(&pool, ghost).await, 1);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn concurrent_first_toggles_never_duplicate_the_log() {
    let pool = test_helpers::integration_pool().await;
    let day = date!(2026 - 10 - 19);
    let habit = add_habit(&pool, "Read", day).await.expect("add");

    let (a, b) = tokio::join!(toggle_habit(&pool, habit.id, day), toggle_habit(&pool, habit.id, day));
    let statuses = [a.expect("toggle a"), b.expect("toggle b")];

    assert_eq!(log_count(&pool, habit.id).await, 1);
    assert!(statuses.contains(&true) && statuses.contains(&false));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn delete_removes_habit_and_all_its_logs() {
    let pool = test_helpers::integration_pool().await;
    let habit = add_habit(&pool, "Read", date!(2026 - 10 - 17)).await.expect("add");
    let keep = add_habit(&pool, "Run", date!(2026 - 10 - 17)).await.expect("add");

    for day in [date!(2026 - 10 - 17), date!(2026 - 10 - 18), date!(2026 - 10 - 19)] {
        toggle_habit(&pool, habit.id, day).await.expect("toggle");
    }
    toggle_habit(&pool, keep.id, date!(2026 - 10 - 19)).await.expect("toggle");

    assert!(delete_habit(&pool, habit.id).await.expect("delete"));

    assert_eq!(log_count(&pool, habit.id).await, 0);
    assert_eq!(log_count(&pool, keep.id).await, 1);
    assert_eq!(list_habits(&pool).await.expect("list"), vec![keep]);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn delete_unknown_habit_is_a_successful_no_op() {
    let pool = test_helpers::integration_pool().await;
    let removed = delete_habit(&pool, Uuid::new_v4()).await.expect("delete should not fail");
    assert!(!removed);
}
