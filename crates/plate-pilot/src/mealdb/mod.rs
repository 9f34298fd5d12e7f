// TheMealDB recipe source: HTTP client and wire-format adapter.

pub mod adapter;
pub mod client;

pub use client::{ApiError, MealDbClient};
