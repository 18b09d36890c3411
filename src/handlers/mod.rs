// src/handlers/mod.rs
pub mod companies;
pub mod contracts;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod naics;
