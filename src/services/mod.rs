// src/services/mod.rs
pub mod api;
pub mod export;
pub mod formatting;
pub mod insights;
pub mod normalize;
pub mod pages;
pub mod pagination;
