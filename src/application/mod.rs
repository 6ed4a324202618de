//! Application layer: business logic services orchestrating the domain.

pub mod services;
