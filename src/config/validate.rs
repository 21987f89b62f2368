use anyhow::{Result, bail};

use super::{AppConfig, defaults::MIN_JWT_SECRET_LEN};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    match cfg.auth.as_ref() {
        None => errors.push("auth.jwt_secret must be set".to_string()),
        Some(auth) => {
            if auth.jwt_secret.trim().len() < MIN_JWT_SECRET_LEN {
                errors.push(format!(
                    "auth.jwt_secret must be at least {MIN_JWT_SECRET_LEN} characters"
                ));
            }

            if auth.session_ttl_secs == 0 {
                errors.push("auth.session_ttl_secs must be > 0".to_string());
            }
        }
    }

    match reqwest::Url::parse(&cfg.pokedex.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(_) => errors.push("pokedex.base_url must use http or https".to_string()),
        Err(err) => errors.push(format!("pokedex.base_url is not a valid url: {err}")),
    }

    if cfg.pokedex.timeout_secs == 0 {
        errors.push("pokedex.timeout_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use crate::config::{AppConfig, AuthConfig};

    use super::validate;

    fn valid_config() -> AppConfig {
        AppConfig {
            auth: Some(AuthConfig::with_secret("a-sufficiently-long-secret")),
            ..AppConfig::default()
        }
    }

    #[test]
    fn defaults_with_auth_secret_are_valid() {
        validate(&valid_config()).expect("default config should validate");
    }

    #[test]
    fn missing_auth_section_is_reported() {
        let cfg = AppConfig::default();
        let err = validate(&cfg).expect_err("auth is required");
        assert!(err.to_string().contains("auth.jwt_secret must be set"));
    }

    #[test]
    fn collects_every_violation() {
        let mut cfg = valid_config();
        cfg.general.host = " ".to_string();
        cfg.database.min_idle = 20;
        cfg.pokedex.base_url = "ftp://pokeapi.co".to_string();
        cfg.pokedex.timeout_secs = 0;
        if let Some(auth) = cfg.auth.as_mut() {
            auth.jwt_secret = "short".to_string();
            auth.session_ttl_secs = 0;
        }

        let message = validate(&cfg).expect_err("config should be rejected").to_string();
        assert!(message.starts_with("invalid app config:"));
        for expected in [
            "general.host must not be empty",
            "database.min_idle (20) must be <= database.max_connections (10)",
            "auth.jwt_secret must be at least 16 characters",
            "auth.session_ttl_secs must be > 0",
            "pokedex.base_url must use http or https",
            "pokedex.timeout_secs must be > 0",
        ] {
            assert!(message.contains(expected), "missing `{expected}` in {message}");
        }
    }

    #[test]
    fn unparsable_pokedex_url_is_rejected() {
        let mut cfg = valid_config();
        cfg.pokedex.base_url = "not a url".to_string();
        let message = validate(&cfg).expect_err("url should be rejected").to_string();
        assert!(message.contains("pokedex.base_url is not a valid url"));
    }
}
