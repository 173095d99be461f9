//! Core use-case services.
//!
//! # Responsibility
//! - Wrap store operations into envelope-returning async calls.
//! - Keep the controller decoupled from storage details.

pub mod profile_service;
pub mod response;
