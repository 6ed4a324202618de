//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`media`] - On-disk image and preview storage
//! - [`persistence`] - PostgreSQL repository implementations

pub mod media;
pub mod persistence;
