//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Exercise, NewExercise, NewSet, Workout};
use crate::error::JournalResult;

/// Set payload: `{reps, weight}`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SetRequest {
    pub reps: i64,
    pub weight: f64,
}

impl SetRequest {
    pub fn into_new_set(self) -> JournalResult<NewSet> {
        NewSet::new(self.reps, self.weight)
    }
}

/// Exercise payload: `{name, description?, sets?}`
///
/// IDs supplied by the client are ignored; the workout assigns them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetRequest>,
}

impl ExerciseRequest {
    pub fn into_new_exercise(self) -> JournalResult<NewExercise> {
        let sets = self
            .sets
            .into_iter()
            .map(SetRequest::into_new_set)
            .collect::<JournalResult<Vec<_>>>()?;

        NewExercise::new(&self.name, self.description, sets)
    }
}

/// Workout representation
///
/// The version and entry counter stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: i64,
    pub user_id: i64,
    pub start_time: i64,
    pub exercises: Vec<Exercise>,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.workout_id.value(),
            user_id: workout.user_id.value(),
            start_time: workout.start_time,
            exercises: workout.exercises,
        }
    }
}
