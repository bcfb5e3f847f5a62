use thiserror::Error;

/// 設定値の読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// 環境変数から読み込むアプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub database_max_connections: u32,
}

impl AppConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "postgres://localhost/share_it";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// 環境変数から設定を読み込む
    ///
    /// - DATABASE_URL（既定: postgres://localhost/share_it）
    /// - PORT（既定: 3000）
    /// - DATABASE_MAX_CONNECTIONS（既定: 5）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| Self::DEFAULT_DATABASE_URL.to_string());
        let port = parse_or("PORT", lookup("PORT"), Self::DEFAULT_PORT)?;
        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            Self::DEFAULT_MAX_CONNECTIONS,
        )?;

        Ok(Self {
            database_url,
            port,
            database_max_connections,
        })
    }

    /// サーバーの待ち受けアドレス
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    match value {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|source| ConfigError::InvalidNumber {
                name,
                value,
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.database_url, AppConfig::DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_all_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/test"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://db/test");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 20);
    }

    #[test]
    fn test_invalid_port_is_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber { name: "PORT", .. })
        ));
    }
}
