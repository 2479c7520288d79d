//! Runtime settings, read once at startup from `ADCMS_*` environment variables.

use std::io;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "adcms.sqlite";
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding templates, URL templates and contents.
    pub database_path: PathBuf,
    /// Maximum accepted JSON body, in bytes. CSV imports travel as JSON.
    pub json_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(AppConfig {
            host: lookup("ADCMS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("ADCMS_PORT", lookup("ADCMS_PORT"), DEFAULT_PORT)?,
            database_path: lookup("ADCMS_DATABASE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            json_limit: parse_or(
                "ADCMS_JSON_LIMIT",
                lookup("ADCMS_JSON_LIMIT"),
                DEFAULT_JSON_LIMIT,
            )?,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    #[cfg(test)]
    pub fn with_database(path: impl Into<PathBuf>) -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: path.into(),
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> io::Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{key} must be a number, got '{value}'"),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("adcms.sqlite"));
        assert_eq!(config.json_limit, 10 * 1024 * 1024);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn variables_override_defaults() {
        let config = AppConfig::from_lookup(lookup_in(&[
            ("ADCMS_HOST", "0.0.0.0"),
            ("ADCMS_PORT", " 9000 "),
            ("ADCMS_DATABASE", "/tmp/ads.sqlite"),
            ("ADCMS_JSON_LIMIT", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.url(), "http://0.0.0.0:9000");
        assert_eq!(config.database_path, PathBuf::from("/tmp/ads.sqlite"));
        assert_eq!(config.json_limit, 1024);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_in(&[("ADCMS_PORT", "http")])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("ADCMS_PORT"));
    }
}
