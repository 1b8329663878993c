use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub query_timeout: Duration,
    pub recent_games_count: i64,
    pub leader_count: usize,
    pub leader_min_games_divisor: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let query_timeout_ms = parse_positive(&env_map, "QUERY_TIMEOUT_MS", 5000)?;
        let recent_games_count = parse_positive(&env_map, "RECENT_GAMES_COUNT", 10)?;
        let leader_count = parse_positive(&env_map, "LEADER_COUNT", 1)?;
        let leader_min_games_divisor = parse_positive(&env_map, "LEADER_MIN_GAMES_DIVISOR", 3)?;

        Ok(Config {
            port,
            database_path,
            query_timeout: Duration::from_millis(query_timeout_ms as u64),
            recent_games_count,
            leader_count: leader_count as usize,
            leader_min_games_divisor,
        })
    }
}

fn parse_positive(
    env_map: &HashMap<String, String>,
    key: &str,
    default: i64,
) -> Result<i64, ConfigError> {
    let Some(raw) = env_map.get(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<i64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("must be a positive integer, got {}", raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_PATH".to_string(), "/tmp/heroball.db".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.query_timeout, Duration::from_millis(5000));
        assert_eq!(config.recent_games_count, 10);
        assert_eq!(config.leader_count, 1);
        assert_eq!(config.leader_min_games_divisor, 3);
    }

    #[test]
    fn test_missing_database_path() {
        let mut env_map = setup_required_env();
        env_map.remove("DATABASE_PATH");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("LEADER_MIN_GAMES_DIVISOR".to_string(), "0".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "LEADER_MIN_GAMES_DIVISOR"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_overrides() {
        let mut env_map = setup_required_env();
        env_map.insert("QUERY_TIMEOUT_MS".to_string(), "250".to_string());
        env_map.insert("LEADER_COUNT".to_string(), "3".to_string());
        env_map.insert("RECENT_GAMES_COUNT".to_string(), "5".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.query_timeout, Duration::from_millis(250));
        assert_eq!(config.leader_count, 3);
        assert_eq!(config.recent_games_count, 5);
    }
}
