// src/store/mod.rs

pub mod rooms;
pub mod users;
