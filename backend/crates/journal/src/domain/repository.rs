//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{MetricId, UserId, WorkoutId};

use crate::domain::entities::{Metric, NewMetric, NewWorkout, Workout};
use crate::error::JournalResult;

/// Workout repository trait
#[trait_variant::make(WorkoutRepository: Send)]
pub trait LocalWorkoutRepository {
    /// Insert an empty workout and return it with its assigned ID
    async fn create(&self, workout: NewWorkout) -> JournalResult<Workout>;

    /// Find workout by ID
    async fn find_by_id(&self, workout_id: WorkoutId) -> JournalResult<Option<Workout>>;

    /// All workouts of a user, ordered by ID
    async fn list_for_user(&self, user_id: UserId) -> JournalResult<Vec<Workout>>;

    /// Replace the exercise document and entry counter
    ///
    /// Applies only while the stored version equals `workout.version`, and
    /// bumps the stored version. Returns `false` when no row matched.
    async fn update(&self, workout: &Workout) -> JournalResult<bool>;

    /// Hard delete. Returns `false` when no row matched.
    async fn delete(&self, workout_id: WorkoutId) -> JournalResult<bool>;
}

/// Metric repository trait
#[trait_variant::make(MetricRepository: Send)]
pub trait LocalMetricRepository {
    /// Insert a metric and return it with its assigned ID
    async fn create(&self, metric: NewMetric) -> JournalResult<Metric>;

    /// Find metric by ID
    async fn find_one(&self, metric_id: MetricId) -> JournalResult<Option<Metric>>;

    /// Overwrite all fields. Returns `false` when no row matched.
    async fn update(&self, metric: &Metric) -> JournalResult<bool>;

    /// Delete by ID. Returns `false` when no row matched.
    async fn delete(&self, metric_id: MetricId) -> JournalResult<bool>;

    /// Every stored metric, ordered by ID
    async fn find_all(&self) -> JournalResult<Vec<Metric>>;
}
