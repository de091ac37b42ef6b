//! Route handlers for the HTTP API.

pub mod announcements;
pub mod health;
pub mod images;
