//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use auth::application::GetUserUseCase;
use auth::{Identity, UserRepository};
use kernel::id::{ExerciseId, ExerciseSetId, UserId, WorkoutId};

use crate::application::WorkoutUseCase;
use crate::domain::repository::WorkoutRepository;
use crate::error::JournalResult;
use crate::presentation::dto::{ExerciseRequest, SetRequest, WorkoutResponse};

/// Shared state for journal handlers
pub struct JournalAppState<W, U>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub workouts: Arc<W>,
    pub users: Arc<U>,
}

impl<W, U> Clone for JournalAppState<W, U>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            workouts: self.workouts.clone(),
            users: self.users.clone(),
        }
    }
}

impl<W, U> JournalAppState<W, U>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    fn use_case(&self) -> WorkoutUseCase<W> {
        WorkoutUseCase::new(self.workouts.clone())
    }

    /// Resolve the caller to an active user ID
    async fn owner(&self, identity: &Identity) -> JournalResult<UserId> {
        let user = GetUserUseCase::new(self.users.clone())
            .execute(&identity.user_name)
            .await?;
        Ok(user.user_id)
    }
}

// ============================================================================
// Workouts
// ============================================================================

/// POST /workouts
pub async fn create_workout<W, U>(
    State(state): State<JournalAppState<W, U>>,
    identity: Identity,
) -> JournalResult<impl IntoResponse>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let owner = state.owner(&identity).await?;
    let workout = state.use_case().create(owner).await?;

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(workout))))
}

/// GET /workouts
pub async fn list_workouts<W, U>(
    State(state): State<JournalAppState<W, U>>,
    identity: Identity,
) -> JournalResult<Json<Vec<WorkoutResponse>>>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let owner = state.owner(&identity).await?;
    let workouts = state.use_case().list_for_user(owner).await?;

    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

/// GET /workouts/{workout_id}
pub async fn get_workout<W, U>(
    State(state): State<JournalAppState<W, U>>,
    identity: Identity,
    path: Result<Path<i64>, PathRejection>,
) -> JournalResult<Json<WorkoutResponse>>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Path(workout_id) = path?;
    let owner = state.owner(&identity).await?;
    let workout = state.use_case().get(owner, WorkoutId::new(workout_id)).await?;

    Ok(Json(WorkoutResponse::from(workout)))
}

/// PUT /workouts/{workout_id}
///
/// Appends one exercise to the workout.
pub async fn add_exercise<W, U>(
    State(state): State<JournalAppState<W, U>>,
    identity: Identity,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ExerciseRequest>, JsonRejection>,
) -> JournalResult<Json<WorkoutResponse>>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Path(workout_id) = path?;
    let Json(req) = body?;
    let exercise = req.into_new_exercise()?;

    let owner = state.owner(&identity).await?;
    let workout = state
        .use_case()
        .add_exercise(owner, WorkoutId::new(workout_id), exercise)
        .await?;

    Ok(Json(WorkoutResponse::from(workout)))
}

/// DELETE /workouts/{workout_id}
pub async fn delete_workout<W, U>(
    State(state): State<JournalAppState<W, U>>,
    identity: Identity,
    path: Result<Path<i64>, PathRejection>,
) -> JournalResult<StatusCode>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Path(workout_id) = path?;
    let owner = state.owner(&identity).await?;
    state
        .use_case()
        .delete(owner, WorkoutId::new(workout_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Exercises and sets
// ============================================================================

/// POST /workouts/{workout_id}/exercises/{exercise_id}
///
/// Appends one set to the exercise.
pub async fn add_set<W, U>(
    State(state): State<JournalAppState<W, U>>,
    identity: Identity,
    path: Result<Path<(i64, i64)>, PathRejection>,
    body: Result<Json<SetRequest>, JsonRejection>,
) -> JournalResult<Json<WorkoutResponse>>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Path((workout_id, exercise_id)) = path?;
    let Json(req) = body?;
    let set = req.into_new_set()?;

    let owner = state.owner(&identity).await?;
    let workout = state
        .use_case()
        .add_set(
            owner,
            WorkoutId::new(workout_id),
            ExerciseId::new(exercise_id),
            set,
        )
        .await?;

    Ok(Json(WorkoutResponse::from(workout)))
}

/// DELETE /workouts/{workout_id}/exercises/{exercise_id}
pub async fn remove_exercise<W, U>(
    State(state): State<JournalAppState<W, U>>,
    identity: Identity,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> JournalResult<StatusCode>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Path((workout_id, exercise_id)) = path?;
    let owner = state.owner(&identity).await?;
    state
        .use_case()
        .remove_exercise(owner, WorkoutId::new(workout_id), ExerciseId::new(exercise_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /workouts/{workout_id}/exercises/{exercise_id}/sets/{set_id}
pub async fn remove_set<W, U>(
    State(state): State<JournalAppState<W, U>>,
    identity: Identity,
    path: Result<Path<(i64, i64, i64)>, PathRejection>,
) -> JournalResult<StatusCode>
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Path((workout_id, exercise_id, set_id)) = path?;
    let owner = state.owner(&identity).await?;
    state
        .use_case()
        .remove_set(
            owner,
            WorkoutId::new(workout_id),
            ExerciseId::new(exercise_id),
            ExerciseSetId::new(set_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
