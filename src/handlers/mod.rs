// src/handlers/mod.rs

pub mod polls;
pub mod questions;
pub mod reports;
pub mod rooms;
pub mod users;
