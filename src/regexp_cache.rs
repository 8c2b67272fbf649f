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

use dashmap::DashMap;
use log::{debug, trace};

use crate::{
    diagnostics::{CacheStats, PatternListing},
    engine::AutomataEngine,
    entry::{handle_for, PatternEntry},
    errors::CacheError,
    handle::RegexHandle,
    interfaces::MatchingEngine,
    options::CompileOptions,
};

/// Cache shared by every thread of the process.
///
/// Lookups and inserts for one pattern are serialized by the lock of the map
/// shard holding it, and a miss compiles while that lock is held. Two threads
/// racing on the same text therefore never compile it twice. Matching is not
/// covered by any lock: every handle carries its own scratch.
pub struct RegexCache<E: MatchingEngine = AutomataEngine> {
    engine: Arc<E>,
    cache: DashMap<Box<str>, Arc<PatternEntry<E>>>,
    accelerate: bool,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::with_engine(AutomataEngine::default(), 0, true)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_engine(AutomataEngine::default(), capacity, true)
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MatchingEngine> RegexCache<E> {
    pub fn with_engine(engine: E, capacity: usize, accelerate: bool) -> Self {
        Self::with_shared_engine(Arc::new(engine), capacity, accelerate)
    }

    pub(crate) fn with_shared_engine(engine: Arc<E>, capacity: usize, accelerate: bool) -> Self {
        Self {
            engine,
            cache: DashMap::with_capacity(capacity),
            accelerate,
        }
    }

    /// Returns a handle for `pattern`, compiling it on the first request.
    pub fn compile(&self, pattern: &str, options: CompileOptions) -> Result<RegexHandle<E>, CacheError> {
        if let Some(entry) = self.cache.get(pattern) {
            trace!("Cache hit for pattern {:?}", pattern);
            return Ok(handle_for(&self.engine, entry.value(), options));
        }
        // Another thread may have inserted the entry since the lookup above,
        // the entry API decides under the shard lock.
        let entry = self.cache.entry(pattern.into()).or_try_insert_with(|| {
            PatternEntry::build(self.engine.as_ref(), pattern, options, self.accelerate).map(Arc::new)
        })?;
        Ok(handle_for(&self.engine, entry.value(), options))
    }

    /// Releases every entry. Handles obtained before stop matching and
    /// report a stale handle instead.
    pub fn teardown(&self) {
        let released = self.cache.len();
        self.cache.clear();
        debug!("Cache torn down, {} entries released", released);
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.cache.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn list_patterns(&self) -> PatternListing {
        PatternListing(self.cache.iter().map(|entry| entry.key().to_string()).collect())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats::from_lengths(self.cache.iter().map(|entry| entry.key().len()))
    }
}
