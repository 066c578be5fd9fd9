//! Domain Entities
//!
//! The workout aggregate owns its exercises, and each exercise owns its
//! sets. Nested entries draw their IDs from one per-workout counter, so an
//! ID is unique across both exercises and sets of the same workout and is
//! never handed out twice.

use kernel::id::{ExerciseId, ExerciseSetId, MetricId, UserId, WorkoutId};
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, JournalResult};

/// First ID handed out by a fresh workout
pub const FIRST_ENTRY_ID: i64 = 1;

// ============================================================================
// Nested entries
// ============================================================================

/// One set of an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: ExerciseSetId,
    pub reps: u32,
    pub weight: f64,
}

/// Exercise inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
}

impl Exercise {
    /// Look up a set by ID
    pub fn set(&self, set_id: ExerciseSetId) -> Option<&ExerciseSet> {
        self.sets.iter().find(|s| s.id == set_id)
    }
}

/// Validated set input (no ID yet)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewSet {
    reps: u32,
    weight: f64,
}

impl NewSet {
    /// ## Errors
    /// * `InvalidSet` - negative or oversized reps, negative or non-finite weight
    pub fn new(reps: i64, weight: f64) -> JournalResult<Self> {
        let reps = u32::try_from(reps).map_err(|_| {
            JournalError::InvalidSet("reps must be a non-negative integer".to_string())
        })?;

        if !weight.is_finite() || weight < 0.0 {
            return Err(JournalError::InvalidSet(
                "weight must be a non-negative number".to_string(),
            ));
        }

        Ok(Self { reps, weight })
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Validated exercise input (no IDs yet)
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    name: String,
    description: Option<String>,
    sets: Vec<NewSet>,
}

impl NewExercise {
    /// Trims the name; a blank description is dropped
    ///
    /// ## Errors
    /// * `MissingField("name")` - blank name
    pub fn new(
        name: impl AsRef<str>,
        description: Option<String>,
        sets: Vec<NewSet>,
    ) -> JournalResult<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(JournalError::MissingField("name"));
        }

        Ok(Self {
            name: name.to_string(),
            description: description.filter(|d| !d.trim().is_empty()),
            sets,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Workout aggregate
// ============================================================================

/// Workout not yet persisted (no ID)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewWorkout {
    pub user_id: UserId,
    /// Epoch seconds
    pub start_time: i64,
}

impl NewWorkout {
    pub fn new(user_id: UserId, start_time: i64) -> Self {
        Self {
            user_id,
            start_time,
        }
    }

    /// Attach the store-assigned ID; the workout starts empty
    pub fn into_workout(self, workout_id: WorkoutId) -> Workout {
        Workout {
            workout_id,
            user_id: self.user_id,
            start_time: self.start_time,
            exercises: Vec::new(),
            version: 0,
            next_entry_id: FIRST_ENTRY_ID,
        }
    }
}

/// Workout aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub workout_id: WorkoutId,
    pub user_id: UserId,
    /// Epoch seconds
    pub start_time: i64,
    pub exercises: Vec<Exercise>,
    /// Optimistic concurrency counter, bumped by every successful write
    pub version: i64,
    /// Next ID to hand out to an exercise or set
    pub next_entry_id: i64,
}

impl Workout {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn exercise(&self, exercise_id: ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    fn exercise_mut(&mut self, exercise_id: ExerciseId) -> JournalResult<&mut Exercise> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)
            .ok_or(JournalError::ExerciseNotFound)
    }

    fn allocate_entry_id(&mut self) -> i64 {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        id
    }

    /// Append an exercise (and its initial sets) with fresh IDs
    pub fn add_exercise(&mut self, exercise: NewExercise) -> ExerciseId {
        let id = ExerciseId::new(self.allocate_entry_id());
        let sets = exercise
            .sets
            .iter()
            .map(|set| ExerciseSet {
                id: ExerciseSetId::new(self.allocate_entry_id()),
                reps: set.reps,
                weight: set.weight,
            })
            .collect();

        self.exercises.push(Exercise {
            id,
            name: exercise.name,
            description: exercise.description,
            sets,
        });

        id
    }

    /// Append a set to an exercise
    ///
    /// The counter is only advanced when the exercise exists.
    pub fn add_set(&mut self, exercise_id: ExerciseId, set: NewSet) -> JournalResult<ExerciseSetId> {
        self.exercise_mut(exercise_id)?;

        let id = ExerciseSetId::new(self.allocate_entry_id());
        self.exercise_mut(exercise_id)?.sets.push(ExerciseSet {
            id,
            reps: set.reps,
            weight: set.weight,
        });

        Ok(id)
    }

    /// Remove an exercise; the list is untouched when nothing matches
    pub fn remove_exercise(&mut self, exercise_id: ExerciseId) -> JournalResult<Exercise> {
        let index = self
            .exercises
            .iter()
            .position(|e| e.id == exercise_id)
            .ok_or(JournalError::ExerciseNotFound)?;

        Ok(self.exercises.remove(index))
    }

    /// Remove one set of an exercise
    pub fn remove_set(
        &mut self,
        exercise_id: ExerciseId,
        set_id: ExerciseSetId,
    ) -> JournalResult<ExerciseSet> {
        let exercise = self.exercise_mut(exercise_id)?;
        let index = exercise
            .sets
            .iter()
            .position(|s| s.id == set_id)
            .ok_or(JournalError::SetNotFound)?;

        Ok(exercise.sets.remove(index))
    }
}

// ============================================================================
// Metric
// ============================================================================

/// Daily body metric record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub metric_id: MetricId,
    pub user_id: UserId,
    pub weight: Option<String>,
    pub calories_consumed: Option<String>,
    pub day: String,
}

/// Metric not yet persisted (no ID)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMetric {
    pub user_id: UserId,
    pub weight: Option<String>,
    pub calories_consumed: Option<String>,
    pub day: String,
}

impl NewMetric {
    pub fn into_metric(self, metric_id: MetricId) -> Metric {
        Metric {
            metric_id,
            user_id: self.user_id,
            weight: self.weight,
            calories_consumed: self.calories_consumed,
            day: self.day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_workout() -> Workout {
        NewWorkout::new(UserId::new(7), 1_700_000_000).into_workout(WorkoutId::new(1))
    }

    fn squat(sets: Vec<NewSet>) -> NewExercise {
        NewExercise::new("Squat", Some("Back squat".into()), sets).unwrap()
    }

    #[test]
    fn test_new_workout_is_empty() {
        let workout = empty_workout();
        assert!(workout.exercises.is_empty());
        assert_eq!(workout.version, 0);
        assert_eq!(workout.next_entry_id, FIRST_ENTRY_ID);
        assert!(workout.is_owned_by(UserId::new(7)));
        assert!(!workout.is_owned_by(UserId::new(8)));
    }

    #[test]
    fn test_ids_are_distinct_and_non_zero() {
        let mut workout = empty_workout();
        let initial = vec![NewSet::new(5, 100.0).unwrap(), NewSet::new(5, 105.0).unwrap()];
        let exercise_id = workout.add_exercise(squat(initial));
        let set_id = workout.add_set(exercise_id, NewSet::new(3, 110.0).unwrap()).unwrap();

        let mut ids: Vec<i64> = vec![exercise_id.value(), set_id.value()];
        ids.extend(workout.exercises[0].sets.iter().map(|s| s.id.value()));
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 4);
        assert!(ids.iter().all(|&id| id != 0));
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut workout = empty_workout();
        let first = workout.add_exercise(squat(vec![]));
        workout.remove_exercise(first).unwrap();
        let second = workout.add_exercise(squat(vec![]));

        assert_ne!(first, second);
    }

    #[test]
    fn test_add_set_to_missing_exercise() {
        let mut workout = empty_workout();
        let before = workout.next_entry_id;
        let result = workout.add_set(ExerciseId::new(42), NewSet::new(1, 1.0).unwrap());

        assert!(matches!(result, Err(JournalError::ExerciseNotFound)));
        assert_eq!(workout.next_entry_id, before);
    }

    #[test]
    fn test_remove_missing_exercise_leaves_list_unchanged() {
        let mut workout = empty_workout();
        workout.add_exercise(squat(vec![]));
        let before = workout.exercises.clone();

        assert!(matches!(
            workout.remove_exercise(ExerciseId::new(999)),
            Err(JournalError::ExerciseNotFound)
        ));
        assert_eq!(workout.exercises, before);
    }

    #[test]
    fn test_remove_set() {
        let mut workout = empty_workout();
        let exercise_id = workout.add_exercise(squat(vec![NewSet::new(5, 60.0).unwrap()]));
        let set_id = workout.exercises[0].sets[0].id;

        assert!(matches!(
            workout.remove_set(exercise_id, ExerciseSetId::new(999)),
            Err(JournalError::SetNotFound)
        ));
        assert!(matches!(
            workout.remove_set(ExerciseId::new(999), set_id),
            Err(JournalError::ExerciseNotFound)
        ));

        let removed = workout.remove_set(exercise_id, set_id).unwrap();
        assert_eq!(removed.reps, 5);
        assert!(workout.exercise(exercise_id).unwrap().sets.is_empty());
    }

    #[test]
    fn test_set_validation() {
        assert!(NewSet::new(0, 0.0).is_ok());
        assert!(matches!(NewSet::new(-1, 10.0), Err(JournalError::InvalidSet(_))));
        assert!(matches!(NewSet::new(5, -0.5), Err(JournalError::InvalidSet(_))));
        assert!(matches!(NewSet::new(5, f64::NAN), Err(JournalError::InvalidSet(_))));
        assert!(matches!(
            NewSet::new(i64::from(u32::MAX) + 1, 1.0),
            Err(JournalError::InvalidSet(_))
        ));
    }

    #[test]
    fn test_exercise_validation() {
        assert!(matches!(
            NewExercise::new("   ", None, vec![]),
            Err(JournalError::MissingField("name"))
        ));

        let exercise = NewExercise::new("  Bench  ", Some(" ".into()), vec![]).unwrap();
        assert_eq!(exercise.name(), "Bench");
        assert!(exercise.description.is_none());
    }

    #[test]
    fn test_exercise_document_shape() {
        let mut workout = empty_workout();
        workout.add_exercise(NewExercise::new("Plank", None, vec![]).unwrap());

        let json = serde_json::to_value(&workout.exercises).unwrap();
        assert_eq!(json, serde_json::json!([{"id": 1, "name": "Plank", "sets": []}]));
    }
}
