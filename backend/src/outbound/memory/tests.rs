//! Tests for the in-memory storage adapter.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{Local, TimeDelta, TimeZone};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

/// Clock replaying a fixed sequence of instants, repeating the last one.
struct ScriptedClock(Mutex<Vec<DateTime<Utc>>>);

impl ScriptedClock {
    fn new(mut instants: Vec<DateTime<Utc>>) -> Self {
        instants.reverse();
        Self(Mutex::new(instants))
    }
}

impl Clock for ScriptedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut instants = self.0.lock().expect("clock lock");
        if instants.len() > 1 {
            instants.pop().expect("non-empty")
        } else {
            *instants.last().expect("scripted clock needs an instant")
        }
    }
}

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0)
        .single()
        .expect("valid timestamp")
        + TimeDelta::minutes(minutes)
}

fn draft(name: &str) -> DemoBookingDraft {
    DemoBookingDraft::from_payload(&json!({
        "name": name,
        "email": "parent@example.com",
        "phone": "0123456789",
        "grade": "Grade 5",
    }))
    .expect("fixture payload is valid")
}

#[fixture]
fn storage() -> MemoryStorage {
    MemoryStorage::new(Arc::new(mockable::DefaultClock))
}

#[rstest]
#[tokio::test]
async fn created_booking_echoes_fields(storage: MemoryStorage) {
    let submitted = draft("Asha Rao");
    let booking = storage
        .create_demo_booking(submitted.clone())
        .await
        .expect("create succeeds");

    assert_eq!(booking.draft(), &submitted);
    let listed = storage.get_demo_bookings().await.expect("list succeeds");
    assert_eq!(listed, vec![booking]);
}

#[rstest]
#[tokio::test]
async fn empty_store_lists_nothing(storage: MemoryStorage) {
    assert!(storage.get_demo_bookings().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn identical_drafts_get_distinct_ids(storage: MemoryStorage) {
    let first = storage
        .create_demo_booking(draft("Asha Rao"))
        .await
        .expect("create");
    let second = storage
        .create_demo_booking(draft("Asha Rao"))
        .await
        .expect("create");

    assert_ne!(first.id(), second.id());
    assert_eq!(storage.get_demo_bookings().await.expect("list").len(), 2);
}

#[rstest]
#[tokio::test]
async fn listing_is_newest_first() {
    let storage = MemoryStorage::new(Arc::new(ScriptedClock::new(vec![at(0), at(1), at(2)])));
    for name in ["First", "Second", "Third"] {
        storage.create_demo_booking(draft(name)).await.expect("create");
    }

    let names: Vec<_> = storage
        .get_demo_bookings()
        .await
        .expect("list")
        .iter()
        .map(|booking| booking.draft().name().to_string())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[rstest]
#[case(1, vec!["Third"])]
#[case(2, vec!["Third", "Second"])]
#[case(10, vec!["Third", "Second", "First"])]
#[tokio::test]
async fn latest_listing_takes_the_newest(#[case] limit: usize, #[case] expected: Vec<&str>) {
    let storage = MemoryStorage::new(Arc::new(ScriptedClock::new(vec![at(0), at(1), at(2)])));
    for name in ["First", "Second", "Third"] {
        storage.create_demo_booking(draft(name)).await.expect("create");
    }

    let limit = NonZeroUsize::new(limit).expect("non-zero limit");
    let names: Vec<_> = storage
        .get_latest_demo_bookings(limit)
        .await
        .expect("list")
        .iter()
        .map(|booking| booking.draft().name().to_string())
        .collect();
    assert_eq!(names, expected);
}

#[rstest]
#[tokio::test]
async fn timestamps_never_go_backwards() {
    let storage = MemoryStorage::new(Arc::new(ScriptedClock::new(vec![at(5), at(1)])));
    let first = storage.create_demo_booking(draft("Early")).await.expect("create");
    let second = storage.create_demo_booking(draft("Skewed")).await.expect("create");

    assert_eq!(first.created_at(), at(5));
    assert_eq!(second.created_at(), at(5));
    let listed = storage.get_demo_bookings().await.expect("list");
    assert_eq!(listed.first().map(DemoBooking::id), Some(second.id()));
}

#[rstest]
#[tokio::test]
async fn instances_do_not_share_state(storage: MemoryStorage) {
    storage.create_demo_booking(draft("Asha Rao")).await.expect("create");
    let other = MemoryStorage::new(Arc::new(mockable::DefaultClock));
    assert!(other.get_demo_bookings().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn concurrent_creates_are_all_visible() {
    let storage = Arc::new(MemoryStorage::new(Arc::new(mockable::DefaultClock)));
    let handles: Vec<_> = (0..16)
        .map(|index| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move {
                storage
                    .create_demo_booking(draft(&format!("Student {index}")))
                    .await
                    .expect("create")
                    .id()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.expect("task joins"));
    }
    assert_eq!(ids.len(), 16);
    assert_eq!(storage.get_demo_bookings().await.expect("list").len(), 16);
}

#[rstest]
#[tokio::test]
async fn users_round_trip_by_id_and_username(storage: MemoryStorage) {
    let created = storage
        .create_user(NewUser::try_new("tutor", "s3cret!").expect("valid user"))
        .await
        .expect("create user");

    let by_id = storage.get_user(&created.id()).await.expect("get user");
    assert_eq!(by_id.as_ref(), Some(&created));

    let username = Username::new("tutor").expect("valid username");
    let by_name = storage
        .get_user_by_username(&username)
        .await
        .expect("get by username");
    assert_eq!(by_name, Some(created));
}

#[rstest]
#[tokio::test]
async fn username_lookup_returns_first_match(storage: MemoryStorage) {
    let first = storage
        .create_user(NewUser::try_new("tutor", "password-one").expect("valid user"))
        .await
        .expect("create user");
    storage
        .create_user(NewUser::try_new("tutor", "password-two").expect("valid user"))
        .await
        .expect("create user");

    let username = Username::new("tutor").expect("valid username");
    let found = storage
        .get_user_by_username(&username)
        .await
        .expect("get by username")
        .expect("user exists");
    assert_eq!(found.id(), first.id());
}

#[rstest]
#[tokio::test]
async fn healthy_store_passes_the_connection_check(storage: MemoryStorage) {
    storage.check_connection().await.expect("memory store is usable");
}

#[rstest]
#[tokio::test]
async fn unknown_user_is_absent(storage: MemoryStorage) {
    let missing = storage.get_user(&UserId::random()).await.expect("get user");
    assert!(missing.is_none());
}
