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

use std::sync::Arc;

use log::debug;
use strum::{EnumIter, EnumString};

use crate::{
    config::CacheConfig,
    diagnostics::{CacheStats, PatternListing},
    engine::AutomataEngine,
    errors::CacheError,
    handle::RegexHandle,
    interfaces::MatchingEngine,
    local_cache::LocalRegexCache,
    options::CompileOptions,
    regexp_cache::RegexCache,
};

/// How cache instances are laid out across threads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, strum::Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ConcurrencyMode {
    /// One cache for the whole process. Misses are serialized by a lock,
    /// each pattern is compiled once process-wide.
    #[default]
    SharedGlobal,
    /// Every worker owns an independent cache. Nothing is locked, patterns
    /// are compiled once per worker.
    PerThread,
}

/// Entry point holding the chosen [`ConcurrencyMode`].
///
/// Workers call [`context`](Self::context) once and keep the returned
/// [`CacheContext`] for their whole life.
///
/// ```
/// use rxcache::{CacheConfig, CacheProvider, CompileOptions, ConcurrencyMode};
///
/// let provider = CacheProvider::new(CacheConfig::new(ConcurrencyMode::PerThread));
/// let context = provider.context();
/// let mut handle = context.compile("^hello.*world$", CompileOptions::NONE).unwrap();
/// assert_eq!(handle.is_match(b"hello awesome world"), Ok(true));
/// ```
pub struct CacheProvider<E: MatchingEngine = AutomataEngine> {
    config: CacheConfig,
    engine: Arc<E>,
    shared: Option<Arc<RegexCache<E>>>,
}

impl CacheProvider {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_engine(config, AutomataEngine::new(config.engine_limits()))
    }
}

impl<E: MatchingEngine> CacheProvider<E> {
    pub fn with_engine(config: CacheConfig, engine: E) -> Self {
        let engine = Arc::new(engine);
        let shared = match config.mode {
            ConcurrencyMode::SharedGlobal => Some(Arc::new(RegexCache::with_shared_engine(
                Arc::clone(&engine),
                config.initial_capacity,
                config.acceleration,
            ))),
            ConcurrencyMode::PerThread => None,
        };
        debug!("Created cache provider in {} mode", config.mode);
        Self { config, engine, shared }
    }

    pub fn mode(&self) -> ConcurrencyMode {
        self.config.mode
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the cache the calling worker should use: the shared instance,
    /// or a fresh one owned by the caller.
    pub fn context(&self) -> CacheContext<E> {
        match &self.shared {
            Some(shared) => CacheContext::Shared(Arc::clone(shared)),
            None => CacheContext::Local(LocalRegexCache::with_shared_engine(
                Arc::clone(&self.engine),
                self.config.initial_capacity,
                self.config.acceleration,
            )),
        }
    }
}

/// A worker's view of the cache.
pub enum CacheContext<E: MatchingEngine = AutomataEngine> {
    Shared(Arc<RegexCache<E>>),
    Local(LocalRegexCache<E>),
}

impl<E: MatchingEngine> CacheContext<E> {
    pub fn mode(&self) -> ConcurrencyMode {
        match self {
            CacheContext::Shared(_) => ConcurrencyMode::SharedGlobal,
            CacheContext::Local(_) => ConcurrencyMode::PerThread,
        }
    }

    pub fn compile(&self, pattern: &str, options: CompileOptions) -> Result<RegexHandle<E>, CacheError> {
        match self {
            CacheContext::Shared(cache) => cache.compile(pattern, options),
            CacheContext::Local(cache) => cache.compile(pattern, options),
        }
    }

    /// Tears down the active cache instance. In shared mode this affects
    /// every worker.
    pub fn teardown(&self) {
        match self {
            CacheContext::Shared(cache) => cache.teardown(),
            CacheContext::Local(cache) => cache.teardown(),
        }
    }

    pub fn contains(&self, pattern: &str) -> bool {
        match self {
            CacheContext::Shared(cache) => cache.contains(pattern),
            CacheContext::Local(cache) => cache.contains(pattern),
        }
    }

    pub fn list_patterns(&self) -> PatternListing {
        match self {
            CacheContext::Shared(cache) => cache.list_patterns(),
            CacheContext::Local(cache) => cache.list_patterns(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        match self {
            CacheContext::Shared(cache) => cache.stats(),
            CacheContext::Local(cache) => cache.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{CacheContext, CacheProvider, ConcurrencyMode};
    use crate::{config::CacheConfig, options::CompileOptions};

    #[test]
    fn mode_names() {
        assert_eq!(ConcurrencyMode::default(), ConcurrencyMode::SharedGlobal);
        assert_eq!(ConcurrencyMode::SharedGlobal.to_string(), "shared-global");
        assert_eq!(ConcurrencyMode::from_str("per-thread"), Ok(ConcurrencyMode::PerThread));
        assert!(ConcurrencyMode::from_str("global").is_err());
    }

    #[test]
    fn shared_contexts_see_each_other() {
        let provider = CacheProvider::new(CacheConfig::default());
        let first = provider.context();
        let second = provider.context();
        assert!(matches!(first, CacheContext::Shared(_)));
        let a = first.compile("shared", CompileOptions::NONE).unwrap();
        let b = second.compile("shared", CompileOptions::NONE).unwrap();
        assert!(a.same_entry(&b));
        assert_eq!(second.stats().count, 1);
    }

    #[test]
    fn local_contexts_are_independent() {
        let provider = CacheProvider::new(CacheConfig::new(ConcurrencyMode::PerThread));
        let first = provider.context();
        let second = provider.context();
        assert_eq!(first.mode(), ConcurrencyMode::PerThread);
        let a = first.compile("local", CompileOptions::NONE).unwrap();
        let b = second.compile("local", CompileOptions::NONE).unwrap();
        assert!(!a.same_entry(&b));
        first.teardown();
        assert!(!a.is_valid());
        assert!(b.is_valid());
        assert!(second.contains("local"));
    }
}
