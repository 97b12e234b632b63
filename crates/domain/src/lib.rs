//! Domain layer for the patrol admin backend.
//!
//! This crate contains:
//! - Domain models (scans, anomalies, officers, houses, administrators)
//! - The patrol statistics engine and its upstream source traits
//! - Back-office rules (suspension windows, notification texts, audit actions)

pub mod models;
pub mod services;
