// src/models/mod.rs

pub mod report;
pub mod room;
pub mod user;
