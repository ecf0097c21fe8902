use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use features::{attendance, members, schedules, teams};
use middleware::auth::ApiKeys;
use state::{AppState, TeamSettings};

#[derive(OpenApi)]
#[openapi(
    paths(
        members::handlers::list_members,
        members::handlers::get_member,
        members::handlers::create_member,
        members::handlers::update_member,
        schedules::handlers::list_schedules,
        schedules::handlers::get_schedule,
        schedules::handlers::create_schedule,
        schedules::handlers::update_schedule,
        schedules::handlers::delete_schedule,
        attendance::handlers::list_attendance,
        attendance::handlers::vote,
        attendance::handlers::add_guest,
        attendance::handlers::remove_guest,
        teams::handlers::get_teams,
        teams::handlers::form_teams,
        teams::handlers::clear_teams,
    ),
    components(
        schemas(
            storage::dto::member::MemberResponse,
            storage::dto::member::CreateMemberRequest,
            storage::dto::member::UpdateMemberRequest,
            storage::dto::schedule::ScheduleResponse,
            storage::dto::schedule::CreateScheduleRequest,
            storage::dto::schedule::UpdateScheduleRequest,
            storage::dto::attendance::AttendanceResponse,
            storage::dto::attendance::VoteRequest,
            storage::dto::attendance::AddGuestRequest,
            storage::dto::team::BalanceTeamsRequest,
            storage::dto::team::TeamMemberResponse,
            storage::dto::team::TeamResponse,
            storage::dto::team::TeamsResponse,
            storage::dto::team::ClearTeamsResponse,
            storage::dto::common::PaginationMeta,
            storage::models::SkillLevel,
            storage::models::MemberRole,
            storage::models::Attendance,
            storage::models::AttendanceStatus,
            storage::services::team_balancer::BalanceStrategy,
        )
    ),
    tags(
        (name = "members", description = "Club members and their skill levels"),
        (name = "schedules", description = "Scheduled games"),
        (name = "attendance", description = "Votes and invited guests"),
        (name = "teams", description = "Balanced team formation"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

fn app(state: AppState, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let schedule_routes = schedules::routes::routes(api_keys.clone())
        .merge(attendance::routes::routes())
        .merge(teams::routes::routes(api_keys.clone()));

    Router::new()
        .nest("/api/members", members::routes::routes(api_keys))
        .nest("/api/schedules", schedule_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Clubhouse API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        "Configuration loaded successfully (default strategy: {})",
        config.team_balance_strategy
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::with_max_connections(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("No API_KEYS configured; admin endpoints will reject every request");
    }

    let state = AppState {
        db,
        teams: TeamSettings {
            default_strategy: config.team_balance_strategy,
        },
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(state, api_keys)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use sqlx::postgres::PgPoolOptions;
    use storage::services::team_balancer::BalanceStrategy;
    use tower::ServiceExt;

    use super::*;

    const SCHEDULE: &str = "6f1c2f7e-3c1a-4a8e-9a53-0c9d1f2b7e10";

    fn test_app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/clubhouse_test")
            .unwrap();
        let state = AppState {
            db: Database::from_pool(pool),
            teams: TeamSettings {
                default_strategy: BalanceStrategy::SnakeDraft,
            },
        };
        app(state, ApiKeys::from_comma_separated("secret"))
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Bearer secret")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_team_formation_requires_api_key() {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/schedules/{SCHEDULE}/teams"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"team_count":2}"#))
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_clearing_teams_requires_api_key() {
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/schedules/{SCHEDULE}/teams"))
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_out_of_range_page_size_is_rejected() {
        let request = Request::builder()
            .uri("/api/schedules?page=1&page_size=500")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "page_size must be between 1 and 100");
    }

    #[tokio::test]
    async fn test_member_with_empty_name_fails_validation() {
        let request = json_request(
            "POST",
            "/api/members",
            serde_json::json!({ "name": "", "level": "AMATEUR_1" }),
        );

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
    }

    #[tokio::test]
    async fn test_schedule_edit_requires_api_key() {
        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/schedules/{SCHEDULE}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"Moved"}"#))
            .unwrap();

        let (status, _) = send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_schedule_edit_with_empty_title_fails_validation() {
        let request = json_request(
            "PUT",
            &format!("/api/schedules/{SCHEDULE}"),
            serde_json::json!({ "title": "" }),
        );

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
    }

    #[tokio::test]
    async fn test_member_role_change_requires_api_key() {
        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/members/{SCHEDULE}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"role":"ADMIN"}"#))
            .unwrap();

        let (status, _) = send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_guest_without_name_fails_validation() {
        let request = json_request(
            "POST",
            &format!("/api/schedules/{SCHEDULE}/guests"),
            serde_json::json!({
                "invited_by": SCHEDULE,
                "guest_name": "",
                "guest_level": "PRO"
            }),
        );

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_team_routes() {
        let request = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let paths = &body["paths"];
        assert!(paths.get("/api/schedules/{schedule_id}/teams").is_some());
        assert!(paths.get("/api/schedules/{schedule_id}/guests/{attendance_id}").is_some());
        assert!(paths.get("/api/members/{member_id}").is_some());
        assert!(paths["/api/schedules/{schedule_id}"].get("put").is_some());
    }
}
