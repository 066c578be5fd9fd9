//! Workout Use Case
//!
//! Every operation runs load -> mutate -> persist against the workout
//! aggregate and is scoped to its owner. A workout owned by someone else
//! is reported exactly like a missing one.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{ExerciseId, ExerciseSetId, UserId, WorkoutId};

use crate::domain::entities::{NewExercise, NewSet, NewWorkout, Workout};
use crate::domain::repository::WorkoutRepository;
use crate::error::{JournalError, JournalResult};

/// Workout use case
pub struct WorkoutUseCase<W>
where
    W: WorkoutRepository,
{
    workout_repo: Arc<W>,
}

impl<W> WorkoutUseCase<W>
where
    W: WorkoutRepository,
{
    pub fn new(workout_repo: Arc<W>) -> Self {
        Self { workout_repo }
    }

    /// Start an empty workout now
    pub async fn create(&self, owner: UserId) -> JournalResult<Workout> {
        self.create_at(owner, Utc::now().timestamp()).await
    }

    /// Start an empty workout at `start_time` (epoch seconds)
    pub async fn create_at(&self, owner: UserId, start_time: i64) -> JournalResult<Workout> {
        let workout = self
            .workout_repo
            .create(NewWorkout::new(owner, start_time))
            .await?;

        tracing::info!(
            workout_id = %workout.workout_id,
            user_id = %owner,
            "Workout created"
        );

        Ok(workout)
    }

    pub async fn get(&self, owner: UserId, workout_id: WorkoutId) -> JournalResult<Workout> {
        self.load_owned(owner, workout_id).await
    }

    pub async fn list_for_user(&self, owner: UserId) -> JournalResult<Vec<Workout>> {
        self.workout_repo.list_for_user(owner).await
    }

    pub async fn add_exercise(
        &self,
        owner: UserId,
        workout_id: WorkoutId,
        exercise: NewExercise,
    ) -> JournalResult<Workout> {
        let mut workout = self.load_owned(owner, workout_id).await?;
        let exercise_id = workout.add_exercise(exercise);
        self.persist(&mut workout).await?;

        tracing::info!(
            workout_id = %workout_id,
            exercise_id = %exercise_id,
            "Exercise added"
        );

        Ok(workout)
    }

    pub async fn add_set(
        &self,
        owner: UserId,
        workout_id: WorkoutId,
        exercise_id: ExerciseId,
        set: NewSet,
    ) -> JournalResult<Workout> {
        let mut workout = self.load_owned(owner, workout_id).await?;
        let set_id = workout.add_set(exercise_id, set)?;
        self.persist(&mut workout).await?;

        tracing::info!(
            workout_id = %workout_id,
            exercise_id = %exercise_id,
            set_id = %set_id,
            "Set added"
        );

        Ok(workout)
    }

    pub async fn remove_exercise(
        &self,
        owner: UserId,
        workout_id: WorkoutId,
        exercise_id: ExerciseId,
    ) -> JournalResult<()> {
        let mut workout = self.load_owned(owner, workout_id).await?;
        workout.remove_exercise(exercise_id)?;
        self.persist(&mut workout).await?;

        tracing::info!(workout_id = %workout_id, exercise_id = %exercise_id, "Exercise removed");

        Ok(())
    }

    pub async fn remove_set(
        &self,
        owner: UserId,
        workout_id: WorkoutId,
        exercise_id: ExerciseId,
        set_id: ExerciseSetId,
    ) -> JournalResult<()> {
        let mut workout = self.load_owned(owner, workout_id).await?;
        workout.remove_set(exercise_id, set_id)?;
        self.persist(&mut workout).await?;

        tracing::info!(
            workout_id = %workout_id,
            exercise_id = %exercise_id,
            set_id = %set_id,
            "Set removed"
        );

        Ok(())
    }

    pub async fn delete(&self, owner: UserId, workout_id: WorkoutId) -> JournalResult<()> {
        self.load_owned(owner, workout_id).await?;

        if !self.workout_repo.delete(workout_id).await? {
            return Err(JournalError::WorkoutNotFound);
        }

        tracing::info!(workout_id = %workout_id, user_id = %owner, "Workout deleted");

        Ok(())
    }

    async fn load_owned(&self, owner: UserId, workout_id: WorkoutId) -> JournalResult<Workout> {
        self.workout_repo
            .find_by_id(workout_id)
            .await?
            .filter(|w| w.is_owned_by(owner))
            .ok_or(JournalError::WorkoutNotFound)
    }

    async fn persist(&self, workout: &mut Workout) -> JournalResult<()> {
        if !self.workout_repo.update(workout).await? {
            return Err(JournalError::ConcurrentModification);
        }

        workout.version += 1;
        Ok(())
    }
}
