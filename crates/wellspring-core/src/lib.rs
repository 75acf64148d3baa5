//! Wellspring Core: domain models, repository traits and the shared
//! error taxonomy.

pub mod error;
pub mod models;
pub mod repository;
