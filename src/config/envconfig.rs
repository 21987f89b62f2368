use std::{collections::HashMap, path::Path};

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Settings read from `APP_`-prefixed variables, `__` between nested keys.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_vars(None)
    }

    /// Reads `vars` instead of the process environment when given.
    fn from_vars(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let source = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars);

        let cfg: Self = config_rs::Config::builder()
            .add_source(source)
            .build()
            .context("failed to read config from the environment")?
            .try_deserialize()
            .context("environment does not match the config layout")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

fn load_dotenv() {
    let crate_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if dotenvy::from_filename(&crate_env).is_err() {
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::EnvConfig;
    use crate::config::AppConfig;

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn nested_keys_land_in_their_sections() {
        let cfg = AppConfig::from_vars(vars(&[
            ("APP_GENERAL__PORT", "8080"),
            ("APP_AUTH__JWT_SECRET", "a-long-enough-test-secret"),
            ("APP_AUTH__SECURE_COOKIES", "true"),
            ("APP_POKEDEX__TIMEOUT_SECS", "9"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.general.port, 8080);
        assert_eq!(cfg.pokedex.timeout_secs, 9);
        let auth = cfg.auth().expect("auth section present");
        assert!(auth.secure_cookies);
        assert_eq!(auth.jwt_secret, "a-long-enough-test-secret");
    }

    #[test]
    fn missing_secret_fails_validation() {
        let err = AppConfig::from_vars(vars(&[("APP_GENERAL__PORT", "8080")]))
            .expect_err("auth secret is required");
        assert!(err.to_string().contains("auth.jwt_secret"));
    }
}
