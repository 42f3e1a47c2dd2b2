//! Domain rules for the movie catalog.
//!
//! This crate has no I/O dependencies so the same rules are shared by the
//! repository layer, the HTTP layer, and tests.

pub mod error;
pub mod movie_filter;
pub mod movie_input;
pub mod roles;
pub mod types;
