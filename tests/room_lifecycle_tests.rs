// tests/room_lifecycle_tests.rs
//
// Storage-backed lifecycle tests. These need a live Postgres, so each test
// skips itself when DATABASE_URL is not set; with it set, they run against
// the migrated schema.

use pollroom_backend::question_gen::QuestionService;
use pollroom_backend::store::rooms::{RoomFilter, RoomStore};
use pollroom_backend::store::users::UserStore;
use pollroom_backend::{config::Config, routes, state::AppState};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

async fn test_pool() -> Option<PgPool> {
    let database_url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    Some(pool)
}

/// Spawns the full app against the test database and returns its base URL.
async fn spawn_app(pool: PgPool) -> String {
    let config = Config {
        database_url: String::new(),
        rust_log: "error".to_string(),
        port: 0,
        question_service_url: None,
    };

    let state = AppState {
        rooms: RoomStore::new(pool.clone()),
        users: UserStore::new(pool),
        questions: QuestionService::new(&config),
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Teacher id unique per test run, so listing tests never see each other's
/// rooms.
fn unique_teacher_id(tag: &str) -> String {
    format!(
        "t-{}-{}",
        tag,
        chrono::Utc::now().timestamp_nanos_opt().unwrap()
    )
}

#[tokio::test]
async fn room_lifecycle_end_to_end() {
    // Arrange
    let Some(pool) = test_pool().await else { return };
    let rooms = RoomStore::new(pool);
    let teacher = unique_teacher_id("lifecycle");

    // Act: create, then walk the one-way status transition
    let room = rooms.create("Algebra", &teacher).await.expect("create failed");
    let code = room.room_code.clone();

    // Assert: fresh room is active and joinable
    assert_eq!(code.len(), 6);
    assert!(rooms.is_valid(&code).await.unwrap());
    assert!(rooms.can_join(&code).await.unwrap());
    assert!(!rooms.is_ended(&code).await.unwrap());

    // Act: end it
    assert!(rooms.end_room(&code).await.unwrap());

    // Assert: ended, not joinable, no resurrection path
    assert!(!rooms.is_valid(&code).await.unwrap());
    assert!(!rooms.can_join(&code).await.unwrap());
    assert!(rooms.is_ended(&code).await.unwrap());
}

#[tokio::test]
async fn end_room_is_idempotent_and_stamps_ended_at_once() {
    // Arrange
    let Some(pool) = test_pool().await else { return };
    let rooms = RoomStore::new(pool);
    let teacher = unique_teacher_id("idem");
    let room = rooms.create("Geometry", &teacher).await.expect("create failed");
    let code = room.room_code.clone();

    // Act
    assert!(rooms.end_room(&code).await.unwrap());
    let first = rooms.find_by_code(&code).await.unwrap().unwrap();

    assert!(rooms.end_room(&code).await.unwrap());
    let second = rooms.find_by_code(&code).await.unwrap().unwrap();

    // Assert: both calls report success, the room stays ended, and the
    // first end's timestamp survives the second call
    assert!(first.is_ended());
    assert!(second.is_ended());
    assert_eq!(first.ended_at, second.ended_at);
    assert!(first.ended_at.is_some());
}

#[tokio::test]
async fn end_room_unknown_code_returns_false() {
    // Arrange
    let Some(pool) = test_pool().await else { return };
    let rooms = RoomStore::new(pool);

    // Act / Assert
    assert!(!rooms.end_room("ZZZZZ0").await.unwrap());
}

#[tokio::test]
async fn find_by_teacher_orders_newest_first_and_filters_by_status() {
    // Arrange
    let Some(pool) = test_pool().await else { return };
    let rooms = RoomStore::new(pool);
    let teacher = unique_teacher_id("list");

    let first = rooms.create("Monday", &teacher).await.expect("create failed");
    // Distinct created_at values for a deterministic sort
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let second = rooms.create("Tuesday", &teacher).await.expect("create failed");
    rooms.end_room(&second.room_code).await.unwrap();

    // Act
    let all = rooms
        .find_by_teacher(&RoomFilter {
            teacher_id: teacher.clone(),
            status: None,
        })
        .await
        .unwrap();
    let active = rooms
        .find_by_teacher(&RoomFilter {
            teacher_id: teacher.clone(),
            status: Some("active".to_string()),
        })
        .await
        .unwrap();
    let ended = rooms
        .find_by_teacher(&RoomFilter {
            teacher_id: teacher,
            status: Some("ended".to_string()),
        })
        .await
        .unwrap();

    // Assert
    let all_codes: Vec<&str> = all.iter().map(|r| r.room_code.as_str()).collect();
    assert_eq!(all_codes, vec![second.room_code.as_str(), first.room_code.as_str()]);

    assert_eq!(active.len(), 1);
    assert_eq!(active[0].room_code, first.room_code);

    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].room_code, second.room_code);
}

#[tokio::test]
async fn answers_are_rejected_after_room_ends() {
    // Arrange
    let Some(pool) = test_pool().await else { return };
    let rooms = RoomStore::new(pool);
    let teacher = unique_teacher_id("ended-answer");
    let room = rooms.create("History", &teacher).await.expect("create failed");

    let room = rooms
        .append_poll(
            &room.room_code,
            "First emperor of Rome?".to_string(),
            vec!["Augustus".to_string(), "Nero".to_string()],
            Some(0),
            60,
        )
        .await
        .expect("append_poll failed");
    rooms.end_room(&room.room_code).await.unwrap();

    // Act
    let result = rooms
        .append_answer(&room.room_code, 1, "u1".to_string(), 0)
        .await;

    // Assert
    assert!(matches!(
        result,
        Err(pollroom_backend::error::AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn joinable_route_answers_from_one_snapshot() {
    // Arrange
    let Some(pool) = test_pool().await else { return };
    let rooms = RoomStore::new(pool.clone());
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let teacher = unique_teacher_id("joinable");
    let room = rooms.create("Physics", &teacher).await.expect("create failed");
    rooms.end_room(&room.room_code).await.unwrap();

    // Act
    let body: serde_json::Value = client
        .get(&format!("{}/api/rooms/{}/joinable", address, room.room_code))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse body");

    let missing: serde_json::Value = client
        .get(&format!("{}/api/rooms/ZZZZZ1/joinable", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse body");

    // Assert: an ended room is consistently "not joinable, ended"; an
    // unknown code collapses to both false rather than a 404
    assert_eq!(body["can_join"], false);
    assert_eq!(body["ended"], true);
    assert_eq!(missing["can_join"], false);
    assert_eq!(missing["ended"], false);
}
