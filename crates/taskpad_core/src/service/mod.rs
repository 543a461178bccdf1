//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep callers decoupled from serialization and backend details.

pub mod task_service;
