use std::fs;
use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Inbound bodies carry the whole payload base64-encoded.
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024 * 1024;

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    listen_addr: Option<SocketAddr>,
    max_body_bytes: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigEnv {
    upload_listen_addr: Option<SocketAddr>,
    upload_max_body_bytes: Option<usize>,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub max_body_bytes: usize,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 7071))
}

fn merge_config(base: ConfigFile, override_config: ConfigEnv) -> Config {
    Config {
        listen_addr: override_config
            .upload_listen_addr
            .or(base.listen_addr)
            .unwrap_or_else(default_listen_addr),
        max_body_bytes: override_config
            .upload_max_body_bytes
            .or(base.max_body_bytes)
            .unwrap_or(DEFAULT_MAX_BODY_BYTES),
    }
}

/// Reads service configuration: an optional `config.toml` under the platform
/// config directory, with environment variables taking precedence.
pub fn read_config() -> Result<Config> {
    let _ = dotenv();
    let env_config = envy::from_env::<ConfigEnv>().unwrap_or_default();

    let file_config = match directories::ProjectDirs::from("com", "stylelabs", "contenthub-upload")
    {
        Some(project_dirs) => {
            let config_file = project_dirs.config_dir().join("config.toml");
            if let Ok(config) = fs::read_to_string(config_file) {
                toml::from_str(&config)?
            } else {
                ConfigFile::default()
            }
        }
        None => ConfigFile::default(),
    };

    Ok(merge_config(file_config, env_config))
}
