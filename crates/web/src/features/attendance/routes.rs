use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{add_guest, list_attendance, remove_guest, vote};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:schedule_id/attendance", get(list_attendance).post(vote))
        .route("/:schedule_id/guests", post(add_guest))
        .route("/:schedule_id/guests/:attendance_id", delete(remove_guest))
}
