use anyhow::Result;
use serde_derive::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use toml;

pub(crate) fn parse<P: AsRef<Path>>(p: P) -> Result<Config> {
    let s = fs::read_to_string(p)?;
    let config = toml::from_str(&s)?;
    Ok(config)
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) debug: bool,
    pub(crate) frame_delay_ms: u64,
}

impl Config {
    pub(crate) fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug: false,
            frame_delay_ms: 500,
        }
    }
}
