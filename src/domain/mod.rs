//! Domain layer: entities and repository traits.
//!
//! Contains no I/O; concrete persistence lives in
//! [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
