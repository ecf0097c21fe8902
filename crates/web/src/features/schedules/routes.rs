use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    create_schedule, delete_schedule, get_schedule, list_schedules, update_schedule,
};
use crate::middleware::auth::{require_auth, ApiKeys};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_schedule))
        .route("/:schedule_id", put(update_schedule).delete(delete_schedule))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_schedules))
        .route("/:schedule_id", get(get_schedule))
        .merge(protected)
}
