//! Personal-fitness coaching backend: plan resolution, gym machine
//! identification and daily ad rotation over an injected content store.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::AppError;
