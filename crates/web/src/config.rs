use anyhow::{Context, Result, anyhow};
use storage::services::team_balancer::BalanceStrategy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub api_keys: String,
    pub team_balance_strategy: BalanceStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: var("HOST").context("Cannot load HOST env variable")?,
            port: var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: var("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?
                .unwrap_or(5),
            api_keys: var("API_KEYS").unwrap_or_default(),
            team_balance_strategy: var("TEAM_BALANCE_STRATEGY")
                .map(|v| v.parse::<BalanceStrategy>().map_err(|e| anyhow!(e)))
                .transpose()
                .context("Invalid TEAM_BALANCE_STRATEGY")?
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("HOST", "0.0.0.0"),
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://club@localhost/club"),
    ];

    #[test]
    fn test_defaults_for_optional_settings() {
        let config = Config::from_source(source(&REQUIRED)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.api_keys, "");
        assert_eq!(config.team_balance_strategy, BalanceStrategy::SnakeDraft);
    }

    #[test]
    fn test_reads_balance_strategy() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("TEAM_BALANCE_STRATEGY", "inviter_affinity"));
        let config = Config::from_source(source(&pairs)).unwrap();
        assert_eq!(config.team_balance_strategy, BalanceStrategy::InviterAffinity);
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("TEAM_BALANCE_STRATEGY", "coin_flip"));
        assert!(Config::from_source(source(&pairs)).is_err());
    }

    #[test]
    fn test_requires_database_url() {
        let pairs = [("HOST", "0.0.0.0"), ("PORT", "8080")];
        assert!(Config::from_source(source(&pairs)).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_port() {
        let pairs = [
            ("HOST", "0.0.0.0"),
            ("PORT", "eighty"),
            ("DATABASE_URL", "postgres://club@localhost/club"),
        ];
        assert!(Config::from_source(source(&pairs)).is_err());
    }
}
