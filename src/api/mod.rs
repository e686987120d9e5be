// API routes and handlers

pub mod health;
pub mod middleware;
pub mod routes;
pub mod users;
pub mod preferences;
pub mod plans;
pub mod machines;
pub mod subscriptions;
pub mod ads;
