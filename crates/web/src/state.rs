use axum::extract::FromRef;
use storage::{Database, services::team_balancer::BalanceStrategy};

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub teams: TeamSettings,
}

/// Server-wide team formation defaults.
#[derive(Debug, Clone, Copy)]
pub struct TeamSettings {
    pub default_strategy: BalanceStrategy,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for TeamSettings {
    fn from_ref(state: &AppState) -> Self {
        state.teams
    }
}
