use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use dirs::home_dir;
use hashbrown::HashMap;
use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{one_of, space0, space1},
    combinator::{map, rest, value},
    sequence::{delimited, tuple},
    IResult,
};
use thiserror::Error;

use crate::renderer::MAX_ROWS;

pub(crate) const FILE_NAME: &str = "gol.properties";

pub(crate) const WORLD_WIDTH: &str = "worldWidth";
pub(crate) const WORLD_HEIGHT: &str = "worldHeight";
pub(crate) const INITIAL_SPAWN_TOLERANCE: &str = "initialSpawnTolerance";
pub(crate) const MAX_STEPS: &str = "maxSteps";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("{} not found (searched: {})", FILE_NAME, join_paths(.0))]
    NotFound(Vec<PathBuf>),
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected `key=value`, found `{text}`")]
    Syntax { line: usize, text: String },
    #[error("missing key `{0}`")]
    MissingKey(&'static str),
    #[error("invalid value `{value}` for `{key}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("`{key}` is {value}, expected {expected}")]
    OutOfRange {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn key(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == '=' || c == ':' || c.is_whitespace())(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(space0, one_of("=:"), space0)),
        value((), space1),
    ))(input)
}

fn entry(input: &str) -> IResult<&str, (&str, &str)> {
    map(tuple((key, separator, rest)), |(k, _, v)| (k, v.trim_end()))(input)
}

/// Raw `key=value` pairs from a properties file.
#[derive(Debug)]
pub(crate) struct Properties(HashMap<String, String>);

impl Properties {
    /// Blank lines and lines starting with `#` or `!` are skipped.
    /// A repeated key keeps its last value.
    pub(crate) fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut entries = HashMap::new();
        for (i, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (_, (k, v)) = entry(line).map_err(|_| ConfigError::Syntax {
                line: i + 1,
                text: line.to_string(),
            })?;
            entries.insert(k.to_string(), v.to_string());
        }
        Ok(Self(entries))
    }

    pub(crate) fn get<T>(&self, key: &'static str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.0.get(key).ok_or(ConfigError::MissingKey(key))?;
        raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) spawn_probability: f64,
    pub(crate) max_steps: u32,
}

impl GameConfig {
    pub(crate) fn from_properties(props: &Properties) -> Result<Self, ConfigError> {
        let width: usize = props.get(WORLD_WIDTH)?;
        let height: usize = props.get(WORLD_HEIGHT)?;
        let spawn_probability: f64 = props.get(INITIAL_SPAWN_TOLERANCE)?;
        let max_steps: u32 = props.get(MAX_STEPS)?;

        for (key, v) in [(WORLD_WIDTH, width), (WORLD_HEIGHT, height)] {
            if v == 0 {
                return Err(ConfigError::OutOfRange {
                    key,
                    value: v.to_string(),
                    expected: "a positive integer",
                });
            }
        }
        if width.checked_mul(height).is_none() {
            return Err(ConfigError::OutOfRange {
                key: WORLD_WIDTH,
                value: format!("{} (with {} = {})", width, WORLD_HEIGHT, height),
                expected: "a grid whose cell count fits in memory addressing",
            });
        }
        if height > MAX_ROWS {
            return Err(ConfigError::OutOfRange {
                key: WORLD_HEIGHT,
                value: height.to_string(),
                expected: "at most 65534 rows",
            });
        }
        if !(0.0..=1.0).contains(&spawn_probability) {
            return Err(ConfigError::OutOfRange {
                key: INITIAL_SPAWN_TOLERANCE,
                value: spawn_probability.to_string(),
                expected: "a probability between 0.0 and 1.0",
            });
        }

        Ok(Self {
            width,
            height,
            spawn_probability,
            max_steps,
        })
    }
}

/// Where `load` looks for the properties file, in order.
pub(crate) fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(FILE_NAME)];
    if let Some(home) = home_dir() {
        paths.push(home.join(".config/gol").join(FILE_NAME));
    }
    paths
}

pub(crate) fn load() -> Result<GameConfig, ConfigError> {
    load_first(&search_paths())
}

/// Loads the first of `paths` that exists.
pub(crate) fn load_first(paths: &[PathBuf]) -> Result<GameConfig, ConfigError> {
    match paths.iter().find(|p| p.is_file()) {
        Some(path) => load_from(path),
        None => Err(ConfigError::NotFound(paths.to_vec())),
    }
}

pub(crate) fn load_from<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    GameConfig::from_properties(&Properties::parse(&s)?)
}
