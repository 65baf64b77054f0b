//! Shared helpers for fukushu end-to-end tests.

pub mod fixtures;
