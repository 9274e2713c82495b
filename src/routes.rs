// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{polls, questions, reports, rooms, users},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (rooms, users, questions).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (stores + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:5173".parse().unwrap(),
        "http://127.0.0.1:5173".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let room_routes = Router::new()
        .route("/", post(rooms::create_room).get(rooms::list_rooms))
        .route("/{code}", get(rooms::get_room))
        .route("/{code}/joinable", get(rooms::joinable))
        .route("/{code}/end", post(rooms::end_room))
        .route("/{code}/polls", post(polls::create_poll))
        .route("/{code}/polls/{poll_id}/answers", post(polls::submit_answer))
        .route("/{code}/report", get(reports::room_report));

    let user_routes = Router::new()
        .route("/", post(users::register_user))
        .route("/{user_key}", get(users::get_user));

    let question_routes = Router::new().route("/generate", post(questions::generate_questions));

    Router::new()
        .nest("/api/rooms", room_routes)
        .nest("/api/users", user_routes)
        .nest("/api/questions", question_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
