use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub recording: RecordingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingConfig {
    /// Bound of the in-process session event channel.
    pub channel_capacity: usize,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            channel_capacity: crate::channel::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from `<path>.{toml,yaml,json}`, falling back to
    /// built-in defaults for anything the file does not set. A missing
    /// file is not an error.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "huddle-meetings")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 7710_i64)?
            .set_default(
                "recording.channel_capacity",
                crate::channel::DEFAULT_CHANNEL_CAPACITY as i64,
            )?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
