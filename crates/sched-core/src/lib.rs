//! # sched-core
//!
//! Core types and error types for confsched.
//!
//! This crate provides the foundational types shared across all confsched crates:
//! - Domain values produced by the aggregation core (`Session`, `Speaker`, feedback)
//! - Row types exchanged with the persistence and network adapters
//! - The `Level` enum
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod rows;
