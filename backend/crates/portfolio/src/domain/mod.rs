//! Domain Layer
//!
//! Entities, value objects and repository traits of the portfolio domain.

pub mod entities;
pub mod repository;
pub mod value_objects;
