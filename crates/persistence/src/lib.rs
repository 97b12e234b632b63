//! Persistence layer for the patrol admin backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the upstream sources of the
//!   patrol statistics engine
//! - Query metrics

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
