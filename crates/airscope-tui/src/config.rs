//! Optional config file, layered under CLI flags.
//!
//! Loaded from `~/.config/airscope/config.toml` (platform-appropriate via
//! `directories`), with `AIRSCOPE_*` environment variables merged on top.
//! CLI flags override everything; absence of the file is not an error.

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use tracing::debug;

/// File-backed settings. Every field optional — the CLI supplies defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// Scanner base URL, e.g. `http://127.0.0.1:5000`.
    pub endpoint: Option<String>,
    /// Delay between poll-cycle completion and the next request.
    pub poll_interval_ms: Option<u64>,
    /// MAC masking on startup.
    pub masking: Option<bool>,
    /// Accept self-signed certificates on HTTPS endpoints.
    pub accept_invalid_certs: Option<bool>,
}

/// Load the config file and environment overrides. Returns defaults when
/// neither exists or the file fails to parse (a broken config file should
/// not stop a monitoring tool from starting).
pub fn load() -> FileConfig {
    let mut figment = Figment::new();

    if let Some(dirs) = directories::ProjectDirs::from("", "", "airscope") {
        let path = dirs.config_dir().join("config.toml");
        debug!(path = %path.display(), "looking for config file");
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("AIRSCOPE_"));

    figment.extract().unwrap_or_else(|e| {
        debug!(error = %e, "config file ignored");
        FileConfig::default()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn parses_a_full_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    endpoint = "http://scanner.local:5000"
                    poll_interval_ms = 1500
                    masking = false
                "#,
            )?;
            let config: FileConfig = Figment::new()
                .merge(Toml::file("config.toml"))
                .extract()
                .unwrap();
            assert_eq!(config.endpoint.as_deref(), Some("http://scanner.local:5000"));
            assert_eq!(config.poll_interval_ms, Some(1500));
            assert_eq!(config.masking, Some(false));
            assert_eq!(config.accept_invalid_certs, None);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", r#"endpoint = "http://file.local""#)?;
            jail.set_env("AIRSCOPE_ENDPOINT", "http://env.local");
            let config: FileConfig = Figment::new()
                .merge(Toml::file("config.toml"))
                .merge(Env::prefixed("AIRSCOPE_"))
                .extract()
                .unwrap();
            assert_eq!(config.endpoint.as_deref(), Some("http://env.local"));
            Ok(())
        });
    }
}
