//! Infrastructure Layer
//!
//! Database implementations of the journal repositories.

pub mod memory;
pub mod postgres;

pub use memory::{MemoryMetricRepository, MemoryWorkoutRepository};
pub use postgres::{PgMetricRepository, PgWorkoutRepository};
