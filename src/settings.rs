use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub backend_base_url: Url,
    pub debug: bool,
    /// HS256 secret shared with the studio backend's token issuer.
    pub jwt_secret: String,
    pub enable_swagger: bool,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix
            .add_source(Environment::with_prefix("APP"))
            .set_default("backend_base_url", "https://api.almayoga.es")?
            .set_default("debug", false)?
            .set_default("jwt_secret", "default-secret-change-me")?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.backend_base_url.as_str(), "https://api.almayoga.es/");
        assert!(!settings.debug);
        assert!(settings.enable_swagger);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.jwt_secret, "default-secret-change-me");
    }
}
