//! Shared utilities and common types for the patrol admin backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Hashing utilities for API key lookup
//! - Password hashing with Argon2id
//! - Common validation logic (date bounds, phone numbers)

pub mod crypto;
pub mod password;
pub mod validation;
