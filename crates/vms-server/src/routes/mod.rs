//! HTTP route modules.

pub mod auth;
pub mod health;
pub mod hero;
pub mod pages;
