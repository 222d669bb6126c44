//! Bearer-authenticated API access layer: one client, uniform outcome
//! mapping, typed endpoint models.

pub mod auth;
mod client;
pub mod models;
mod resource;

pub use client::ApiClient;
pub use resource::{settle, Resource};
