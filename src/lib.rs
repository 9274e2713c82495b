// src/lib.rs
#![feature(int_roundings)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod question_gen;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

// Re-export specific items for convenience if needed
pub use routes::create_router;
