use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use super::handlers::{create_member, get_member, list_members, update_member};
use crate::middleware::auth::{require_auth, ApiKeys};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_member))
        .route("/:member_id", put(update_member))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_members))
        .route("/:member_id", get(get_member))
        .merge(protected)
}
