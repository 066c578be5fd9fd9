//! Journal Backend Module
//!
//! Workouts with their nested exercises and sets, plus daily metrics.
//!
//! Clean Architecture structure:
//! - `domain/` - Workout aggregate, Metric, repository traits
//! - `application/` - Owner-scoped workout use case
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Metrics have a storage contract only and are not routed.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::WorkoutUseCase;
pub use domain::entities::{Exercise, ExerciseSet, Metric, NewExercise, NewMetric, NewSet, Workout};
pub use domain::repository::{MetricRepository, WorkoutRepository};
pub use error::{JournalError, JournalResult};
pub use infra::{
    MemoryMetricRepository, MemoryWorkoutRepository, PgMetricRepository, PgWorkoutRepository,
};
pub use presentation::router::journal_router;
