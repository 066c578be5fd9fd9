//! Journal Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use std::sync::Arc;

use auth::{TokenService, UserRepository, require_bearer};

use crate::domain::repository::WorkoutRepository;
use crate::presentation::handlers::{self, JournalAppState};

/// Create the Journal router; every route sits behind the bearer gate
pub fn journal_router<W, U>(workouts: Arc<W>, users: Arc<U>, tokens: Arc<TokenService>) -> Router
where
    W: WorkoutRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let state = JournalAppState { workouts, users };

    Router::new()
        .route(
            "/workouts",
            post(handlers::create_workout::<W, U>).get(handlers::list_workouts::<W, U>),
        )
        .route(
            "/workouts/{workout_id}",
            get(handlers::get_workout::<W, U>)
                .put(handlers::add_exercise::<W, U>)
                .delete(handlers::delete_workout::<W, U>),
        )
        .route(
            "/workouts/{workout_id}/exercises/{exercise_id}",
            post(handlers::add_set::<W, U>).delete(handlers::remove_exercise::<W, U>),
        )
        .route(
            "/workouts/{workout_id}/exercises/{exercise_id}/sets/{set_id}",
            delete(handlers::remove_set::<W, U>),
        )
        .route_layer(from_fn_with_state(tokens, require_bearer))
        .with_state(state)
}
