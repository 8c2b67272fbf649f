// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::str::FromStr;

use crate::{
    discipline::ConcurrencyMode,
    engine::{EngineLimits, DEFAULT_DFA_SIZE_LIMIT, DEFAULT_NFA_SIZE_LIMIT},
    errors::ConfigError,
};

/// Prefix of the environment variables read by [`CacheConfig::from_env`].
pub const ENV_PREFIX: &str = "RXCACHE";

/// Construction-time settings of a cache provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub mode: ConcurrencyMode,
    /// Number of entries each cache instance preallocates room for.
    pub initial_capacity: usize,
    /// Whether new entries try to build an accelerated matcher.
    pub acceleration: bool,
    pub nfa_size_limit: usize,
    pub dfa_size_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            mode: ConcurrencyMode::default(),
            initial_capacity: 128,
            acceleration: true,
            nfa_size_limit: DEFAULT_NFA_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
        }
    }
}

impl CacheConfig {
    pub fn new(mode: ConcurrencyMode) -> Self {
        Self { mode, ..Default::default() }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_acceleration(mut self, enabled: bool) -> Self {
        self.acceleration = enabled;
        self
    }

    pub fn with_size_limits(mut self, nfa_size_limit: usize, dfa_size_limit: usize) -> Self {
        self.nfa_size_limit = nfa_size_limit;
        self.dfa_size_limit = dfa_size_limit;
        self
    }

    pub fn engine_limits(&self) -> EngineLimits {
        EngineLimits {
            nfa_size_limit: self.nfa_size_limit,
            dfa_size_limit: self.dfa_size_limit,
        }
    }

    /// Reads `RXCACHE_MODE`, `RXCACHE_CAPACITY`, `RXCACHE_ACCELERATION`,
    /// `RXCACHE_NFA_SIZE_LIMIT` and `RXCACHE_DFA_SIZE_LIMIT`.
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            let variable = format!("{}_{}", ENV_PREFIX, name);
            lookup(&variable).map(|value| (variable, value))
        };
        let mut config = Self::default();
        if let Some((variable, value)) = read("MODE") {
            config.mode = parse_value(variable, value)?;
        }
        if let Some((variable, value)) = read("CAPACITY") {
            config.initial_capacity = parse_value(variable, value)?;
        }
        if let Some((variable, value)) = read("ACCELERATION") {
            config.acceleration = parse_bool(variable, value)?;
        }
        if let Some((variable, value)) = read("NFA_SIZE_LIMIT") {
            config.nfa_size_limit = parse_value(variable, value)?;
        }
        if let Some((variable, value)) = read("DFA_SIZE_LIMIT") {
            config.dfa_size_limit = parse_value(variable, value)?;
        }
        Ok(config)
    }
}

fn parse_value<T: FromStr>(variable: String, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { variable, value })
}

fn parse_bool(variable: String, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enabled" => Ok(true),
        "0" | "false" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(ConfigError::InvalidValue { variable, value }),
    }
}
