//! Renungan web server library.
//!
//! Exposes the building blocks (config, state, error handling, views,
//! routes) so integration tests and the binary entrypoint share them.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod localizer;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;
