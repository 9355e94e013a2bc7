// Connection settings read from the page query string.
use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "localhost";
/// Port the robot controller's websocket server listens on.
pub const DEFAULT_PORT: u16 = 5743;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
}

fn decode_component(raw: &str) -> Result<String, ConfigError> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|v| v.into_owned())
        .map_err(|_| ConfigError::InvalidEncoding(raw.to_string()))
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ConnectionConfig {
    /// Builds a config from optional `host` and `port` overrides. An empty
    /// override counts as absent.
    pub fn from_overrides(host: Option<&str>, port: Option<&str>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(h) = host.map(str::trim).filter(|h| !h.is_empty()) {
            cfg.host = h.to_string();
        }
        if let Some(p) = port.map(str::trim).filter(|p| !p.is_empty()) {
            cfg.port = p
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| ConfigError::InvalidPort(p.to_string()))?;
        }
        Ok(cfg)
    }

    /// Reads `?host=..&port=..` from a `location.search` string, decoding
    /// form-encoded values (`%XX` and `+`).
    pub fn from_query(search: &str) -> Result<Self, ConfigError> {
        let mut host = None;
        let mut port = None;
        for pair in search.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value)?;
            match decode_component(key)?.as_str() {
                "host" => host = Some(value),
                "port" => port = Some(value),
                _ => {}
            }
        }
        Self::from_overrides(host.as_deref(), port.as_deref())
    }

    /// Reads the overrides from the current page; an unusable query falls
    /// back to the defaults.
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let parsed = match web_sys::UrlSearchParams::new_with_str(&search) {
            Ok(params) => {
                Self::from_overrides(params.get("host").as_deref(), params.get("port").as_deref())
            }
            Err(_) => Self::from_query(&search),
        };
        parsed.unwrap_or_else(|e| {
            log::warn!("{e}; connecting to {}", Self::default().url());
            Self::default()
        })
    }

    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }
}
