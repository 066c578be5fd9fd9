//! PostgreSQL Repository Implementations
//!
//! Exercises and their sets live in one JSONB document per workout and are
//! rewritten as a whole on every update.

use kernel::id::{MetricId, UserId, WorkoutId};
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entities::{Exercise, Metric, NewMetric, NewWorkout, Workout};
use crate::domain::repository::{MetricRepository, WorkoutRepository};
use crate::error::JournalResult;

// ============================================================================
// Workouts
// ============================================================================

/// PostgreSQL-backed workout repository
#[derive(Clone)]
pub struct PgWorkoutRepository {
    pool: PgPool,
}

impl PgWorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl WorkoutRepository for PgWorkoutRepository {
    async fn create(&self, workout: NewWorkout) -> JournalResult<Workout> {
        let workout_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO workouts (
                user_id,
                start_time
            ) VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(workout.user_id.value())
        .bind(workout.start_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(workout.into_workout(WorkoutId::new(workout_id)))
    }

    async fn find_by_id(&self, workout_id: WorkoutId) -> JournalResult<Option<Workout>> {
        let row = sqlx::query_as::<_, WorkoutRow>(
            r#"
            SELECT
                id,
                user_id,
                start_time,
                exercises,
                version,
                next_entry_id
            FROM workouts
            WHERE id = $1
            "#,
        )
        .bind(workout_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WorkoutRow::into_workout))
    }

    async fn list_for_user(&self, user_id: UserId) -> JournalResult<Vec<Workout>> {
        let rows = sqlx::query_as::<_, WorkoutRow>(
            r#"
            SELECT
                id,
                user_id,
                start_time,
                exercises,
                version,
                next_entry_id
            FROM workouts
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WorkoutRow::into_workout).collect())
    }

    async fn update(&self, workout: &Workout) -> JournalResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE workouts SET
                exercises = $3,
                next_entry_id = $4,
                version = version + 1,
                updated_at = now()
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(workout.workout_id.value())
        .bind(workout.version)
        .bind(Json(&workout.exercises))
        .bind(workout.next_entry_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, workout_id: WorkoutId) -> JournalResult<bool> {
        let deleted = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(workout_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Metrics
// ============================================================================

/// PostgreSQL-backed metric repository
#[derive(Clone)]
pub struct PgMetricRepository {
    pool: PgPool,
}

impl PgMetricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MetricRepository for PgMetricRepository {
    async fn create(&self, metric: NewMetric) -> JournalResult<Metric> {
        let metric_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO metrics (
                user_id,
                weight,
                calories_consumed,
                day
            ) VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(metric.user_id.value())
        .bind(metric.weight.as_deref())
        .bind(metric.calories_consumed.as_deref())
        .bind(&metric.day)
        .fetch_one(&self.pool)
        .await?;

        Ok(metric.into_metric(MetricId::new(metric_id)))
    }

    async fn find_one(&self, metric_id: MetricId) -> JournalResult<Option<Metric>> {
        let row = sqlx::query_as::<_, MetricRow>(
            "SELECT id, user_id, weight, calories_consumed, day FROM metrics WHERE id = $1",
        )
        .bind(metric_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MetricRow::into_metric))
    }

    async fn update(&self, metric: &Metric) -> JournalResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE metrics SET
                user_id = $2,
                weight = $3,
                calories_consumed = $4,
                day = $5
            WHERE id = $1
            "#,
        )
        .bind(metric.metric_id.value())
        .bind(metric.user_id.value())
        .bind(metric.weight.as_deref())
        .bind(metric.calories_consumed.as_deref())
        .bind(&metric.day)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, metric_id: MetricId) -> JournalResult<bool> {
        let deleted = sqlx::query("DELETE FROM metrics WHERE id = $1")
            .bind(metric_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn find_all(&self) -> JournalResult<Vec<Metric>> {
        let rows = sqlx::query_as::<_, MetricRow>(
            "SELECT id, user_id, weight, calories_consumed, day FROM metrics ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MetricRow::into_metric).collect())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: i64,
    user_id: i64,
    start_time: i64,
    exercises: Json<Vec<Exercise>>,
    version: i64,
    next_entry_id: i64,
}

impl WorkoutRow {
    fn into_workout(self) -> Workout {
        let exercises = self.exercises.0;

        // Never hand out an ID at or below one already in the document
        let max_entry_id = exercises
            .iter()
            .flat_map(|e| std::iter::once(e.id.value()).chain(e.sets.iter().map(|s| s.id.value())))
            .max()
            .unwrap_or(0);

        Workout {
            workout_id: WorkoutId::new(self.id),
            user_id: UserId::new(self.user_id),
            start_time: self.start_time,
            exercises,
            version: self.version,
            next_entry_id: self.next_entry_id.max(max_entry_id + 1),
        }
    }
}

#[derive(sqlx::FromRow)]
struct MetricRow {
    id: i64,
    user_id: i64,
    weight: Option<String>,
    calories_consumed: Option<String>,
    day: String,
}

impl MetricRow {
    fn into_metric(self) -> Metric {
        Metric {
            metric_id: MetricId::new(self.id),
            user_id: UserId::new(self.user_id),
            weight: self.weight,
            calories_consumed: self.calories_consumed,
            day: self.day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ExerciseSet;
    use kernel::id::{ExerciseId, ExerciseSetId};

    #[test]
    fn test_row_counter_never_trails_document_ids() {
        let row = WorkoutRow {
            id: 1,
            user_id: 2,
            start_time: 0,
            exercises: Json(vec![Exercise {
                id: ExerciseId::new(4),
                name: "Row".into(),
                description: None,
                sets: vec![ExerciseSet {
                    id: ExerciseSetId::new(9),
                    reps: 10,
                    weight: 40.0,
                }],
            }]),
            version: 3,
            next_entry_id: 2,
        };

        let workout = row.into_workout();
        assert_eq!(workout.next_entry_id, 10);
        assert_eq!(workout.version, 3);
    }
}
