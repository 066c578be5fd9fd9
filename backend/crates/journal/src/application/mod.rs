//! Application Layer - Use cases

pub mod workout;

pub use workout::WorkoutUseCase;
