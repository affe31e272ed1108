//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256 signing, Base64, random bytes)
//! - Password hashing (Argon2id with per-hash random salt)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
