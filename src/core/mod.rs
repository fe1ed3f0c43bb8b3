//! Shared constants and helpers (compile everywhere)

pub mod keys;
