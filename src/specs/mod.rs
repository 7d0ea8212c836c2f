// src/specs/mod.rs
pub mod calendar;
pub mod schedule;
pub mod standings;
