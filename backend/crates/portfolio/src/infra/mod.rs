//! Infrastructure Layer
//!
//! Repository implementations: PostgreSQL for production, in-memory for
//! tests and database-less runs.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryPortfolioRepository;
pub use postgres::PgPortfolioRepository;
