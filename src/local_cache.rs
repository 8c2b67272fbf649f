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

use std::{cell::RefCell, collections::HashMap, sync::Arc};

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

/// Cache owned by a single worker thread.
///
/// There is no locking at all; the `RefCell` makes the type `!Sync`, so it
/// can be moved to another thread but never shared between two. Dropping the
/// cache releases all of its entries.
pub struct LocalRegexCache<E: MatchingEngine = AutomataEngine> {
    engine: Arc<E>,
    cache: RefCell<HashMap<Box<str>, Arc<PatternEntry<E>>>>,
    accelerate: bool,
}

impl LocalRegexCache {
    pub fn new() -> Self {
        Self::with_engine(AutomataEngine::default(), 0, true)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_engine(AutomataEngine::default(), capacity, true)
    }
}

impl Default for LocalRegexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MatchingEngine> LocalRegexCache<E> {
    pub fn with_engine(engine: E, capacity: usize, accelerate: bool) -> Self {
        Self::with_shared_engine(Arc::new(engine), capacity, accelerate)
    }

    pub(crate) fn with_shared_engine(engine: Arc<E>, capacity: usize, accelerate: bool) -> Self {
        Self {
            engine,
            cache: RefCell::new(HashMap::with_capacity(capacity)),
            accelerate,
        }
    }

    /// Returns a handle for `pattern`, compiling it on the first request.
    pub fn compile(&self, pattern: &str, options: CompileOptions) -> Result<RegexHandle<E>, CacheError> {
        if let Some(entry) = self.cache.borrow().get(pattern) {
            trace!("Local cache hit for pattern {:?}", pattern);
            return Ok(handle_for(&self.engine, entry, options));
        }
        let entry = Arc::new(PatternEntry::build(
            self.engine.as_ref(),
            pattern,
            options,
            self.accelerate,
        )?);
        let handle = handle_for(&self.engine, &entry, options);
        self.cache.borrow_mut().insert(pattern.into(), entry);
        Ok(handle)
    }

    pub fn teardown(&self) {
        let released = {
            let mut cache = self.cache.borrow_mut();
            let len = cache.len();
            cache.clear();
            len
        };
        debug!("Local cache torn down, {} entries released", released);
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.cache.borrow().contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn list_patterns(&self) -> PatternListing {
        PatternListing(self.cache.borrow().keys().map(|key| key.to_string()).collect())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats::from_lengths(self.cache.borrow().keys().map(|key| key.len()))
    }
}
