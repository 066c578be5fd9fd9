//! In-memory Repository Implementations
//!
//! Same semantics as the PostgreSQL repositories, including the version
//! check on workout writes. Clones share storage.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::{MetricId, UserId, WorkoutId};
use tokio::sync::RwLock;

use crate::domain::entities::{Metric, NewMetric, NewWorkout, Workout};
use crate::domain::repository::{MetricRepository, WorkoutRepository};
use crate::error::JournalResult;

/// Rows keyed by ID, so iteration follows insertion order
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

// ============================================================================
// Workouts
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryWorkoutRepository {
    inner: Arc<RwLock<Table<Workout>>>,
}

impl MemoryWorkoutRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkoutRepository for MemoryWorkoutRepository {
    async fn create(&self, workout: NewWorkout) -> JournalResult<Workout> {
        let mut table = self.inner.write().await;
        let workout_id = table.next_id();
        let workout = workout.into_workout(WorkoutId::new(workout_id));
        table.rows.insert(workout_id, workout.clone());
        Ok(workout)
    }

    async fn find_by_id(&self, workout_id: WorkoutId) -> JournalResult<Option<Workout>> {
        let table = self.inner.read().await;
        Ok(table.rows.get(&workout_id.value()).cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> JournalResult<Vec<Workout>> {
        let table = self.inner.read().await;
        Ok(table
            .rows
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, workout: &Workout) -> JournalResult<bool> {
        let mut table = self.inner.write().await;

        match table.rows.get_mut(&workout.workout_id.value()) {
            Some(stored) if stored.version == workout.version => {
                stored.exercises = workout.exercises.clone();
                stored.next_entry_id = workout.next_entry_id;
                stored.version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, workout_id: WorkoutId) -> JournalResult<bool> {
        let mut table = self.inner.write().await;
        Ok(table.rows.remove(&workout_id.value()).is_some())
    }
}

// ============================================================================
// Metrics
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryMetricRepository {
    inner: Arc<RwLock<Table<Metric>>>,
}

impl MemoryMetricRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricRepository for MemoryMetricRepository {
    async fn create(&self, metric: NewMetric) -> JournalResult<Metric> {
        let mut table = self.inner.write().await;
        let metric_id = table.next_id();
        let metric = metric.into_metric(MetricId::new(metric_id));
        table.rows.insert(metric_id, metric.clone());
        Ok(metric)
    }

    async fn find_one(&self, metric_id: MetricId) -> JournalResult<Option<Metric>> {
        let table = self.inner.read().await;
        Ok(table.rows.get(&metric_id.value()).cloned())
    }

    async fn update(&self, metric: &Metric) -> JournalResult<bool> {
        let mut table = self.inner.write().await;

        match table.rows.get_mut(&metric.metric_id.value()) {
            Some(stored) => {
                *stored = metric.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, metric_id: MetricId) -> JournalResult<bool> {
        let mut table = self.inner.write().await;
        Ok(table.rows.remove(&metric_id.value()).is_some())
    }

    async fn find_all(&self) -> JournalResult<Vec<Metric>> {
        let table = self.inner.read().await;
        Ok(table.rows.values().cloned().collect())
    }
}
