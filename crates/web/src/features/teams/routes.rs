use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers::{clear_teams, form_teams, get_teams};
use crate::middleware::auth::{require_auth, ApiKeys};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:schedule_id/teams", post(form_teams).delete(clear_teams))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:schedule_id/teams", get(get_teams))
        .merge(protected)
}
