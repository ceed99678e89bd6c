//! Data models for snippet inputs.
//!
//! This module contains the request snapshot shared by every formatter and
//! widget in the crate.

pub mod request;

pub use request::{Header, RequestSpec};
