//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) with zeroized clear text
//! - Bearer credential extraction from request headers
//! - Random bytes and Base64 helpers for secrets

pub mod bearer;
pub mod crypto;
pub mod password;
