//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Workout with its nested Exercises and Sets, Metric)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;

pub use entities::{Exercise, ExerciseSet, Metric, NewExercise, NewMetric, NewSet, NewWorkout, Workout};
pub use repository::{MetricRepository, WorkoutRepository};
