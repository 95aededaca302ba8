//! # Coursehub CLI
//!
//! Database seeding utilities for Coursehub development.
//!
//! The seeder talks to storage only through [`coursehub_db::Datastore`], so it
//! runs against PostgreSQL from the binary and against the in-memory store in
//! tests.
//!
//! ## Usage
//!
//! ```ignore
//! use coursehub_cli::seeder::{seed_all, SeedConfig};
//!
//! let store = PgStore::new(pool);
//! let summary = seed_all(&store, &SeedConfig::default()).await?;
//! ```

pub mod seeder;
