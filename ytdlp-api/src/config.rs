//! Service configuration.
//!
//! Built once at startup from defaults and `YTDLP_API_*` environment
//! variables (nested keys separated by `__`, e.g. `YTDLP_API_AUTH__ENABLED`),
//! then shared read-only through [`crate::state::AppState`].

use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use yt_dlp::YtDlp;

pub const ENV_PREFIX: &str = "YTDLP_API";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_SERVICE_NAME: &str = "ytdlp-api";
const DEFAULT_USERNAME: &str = "user";
const DEFAULT_PASSWORD: &str = "pass";
const DEFAULT_BINARY: &str = "yt-dlp";
const DEFAULT_DEMO_URL: &str = "https://www.youtube.com/watch?v=BaW_jenozKc";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Reported by `GET /`.
    pub service_name: String,
    pub auth: AuthConfig,
    pub ytdlp: YtDlpConfig
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// When false, guarded routes are served without credentials.
    pub enabled: bool,
    pub username: String,
    pub password: String,
    pub realm: String
}

#[derive(Debug, Clone, Deserialize)]
pub struct YtDlpConfig {
    pub binary: PathBuf,
    #[serde(default)]
    pub cookies_file: Option<PathBuf>,
    /// Passed to every yt-dlp run ahead of the per-request flags.
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Directory put in front of `PATH` for the yt-dlp process, e.g. where
    /// ffmpeg or a JS runtime lives.
    #[serde(default)]
    pub path_prepend: Option<PathBuf>,
    /// URL extracted by `GET /ytdlp`.
    pub demo_url: String
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(prefixed_env())
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT)?
            .set_default("service_name", DEFAULT_SERVICE_NAME)?
            .set_default("auth.enabled", true)?
            .set_default("auth.username", DEFAULT_USERNAME)?
            .set_default("auth.password", DEFAULT_PASSWORD)?
            .set_default("auth.realm", DEFAULT_SERVICE_NAME)?
            .set_default("ytdlp.binary", DEFAULT_BINARY)?
            .set_default("ytdlp.demo_url", DEFAULT_DEMO_URL)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the yt-dlp client described by the `ytdlp` section.
    pub fn yt_dlp(&self) -> YtDlp {
        let mut client = YtDlp::with_binary(&self.ytdlp.binary);
        client.set_cookies_file(self.ytdlp.cookies_file.clone());
        client.set_extra_args(self.ytdlp.extra_args.clone());
        if let Some(dir) = &self.ytdlp.path_prepend {
            client.set_env("PATH_PREPEND".to_string(), dir.display().to_string());
        }
        client
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            auth: AuthConfig {
                enabled: true,
                username: DEFAULT_USERNAME.to_string(),
                password: DEFAULT_PASSWORD.to_string(),
                realm: DEFAULT_SERVICE_NAME.to_string()
            },
            ytdlp: YtDlpConfig {
                binary: PathBuf::from(DEFAULT_BINARY),
                cookies_file: None,
                extra_args: Vec::new(),
                path_prepend: None,
                demo_url: DEFAULT_DEMO_URL.to_string()
            }
        }
    }
}

fn prefixed_env() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(" ")
        .with_list_parse_key("ytdlp.extra_args")
}
