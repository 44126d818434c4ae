//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits for infrastructure concerns:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM, plus
//!   in-memory equivalents for development and tests
//! - **email**: SMTP-backed confirmation mail delivery via lettre
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod email;
pub mod persistence;
