//! Jobtrack Types - Shared domain types
//!
//! This crate contains domain types used across jobtrack services:
//! - The authenticated subject identifier
//! - Identity-provider profile data

pub mod user;

pub use user::*;
