use serde::Deserialize;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_media_root() -> String {
    "media".to_string()
}

/// Configuration options for the catalog service, loaded from `config.yaml`
/// and/or environment variables at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Path or URL of the SQLite database.
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory the filesystem blob store writes uploaded images to.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// Public base URL under which stored images are served.
    pub media_base_url: String,
}
