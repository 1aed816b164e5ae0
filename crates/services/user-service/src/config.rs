//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{DatabaseConfig, ServiceConfig};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// HTTP listener settings
    pub service: ServiceConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first when present. Missing or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let service_defaults = ServiceConfig::default();
        let database_defaults = DatabaseConfig::default();

        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                host: env::var("USER_SERVICE_HOST").unwrap_or(service_defaults.host),
                port: parse_var("USER_SERVICE_PORT").unwrap_or(service_defaults.port),
                request_timeout_seconds: parse_var("REQUEST_TIMEOUT_SECONDS")
                    .unwrap_or(service_defaults.request_timeout_seconds),
            },
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(database_defaults.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(database_defaults.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(database_defaults.min_connections),
            },
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_numbers_are_ignored() {
        env::set_var("USER_SERVICE_TEST_PORT", "not-a-port");
        assert_eq!(parse_var::<u16>("USER_SERVICE_TEST_PORT"), None);

        env::set_var("USER_SERVICE_TEST_PORT", " 9090 ");
        assert_eq!(parse_var::<u16>("USER_SERVICE_TEST_PORT"), Some(9090));
        env::remove_var("USER_SERVICE_TEST_PORT");
    }

    #[test]
    fn defaults_match_shared_config() {
        let config = UserServiceConfig::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.service_name, "user-service");
        assert_eq!(config.database.max_connections, 10);
    }
}
