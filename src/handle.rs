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

use std::{
    fmt,
    sync::{Arc, Weak},
};

use log::warn;

use crate::{
    engine::AutomataEngine, entry::PatternEntry, errors::MatchError,
    interfaces::MatchingEngine, options::CompileOptions,
};

/// Caller-owned reference to a cached pattern.
///
/// A handle borrows the compiled form from its cache entry but owns its own
/// match scratch, so handles for the same pattern can be used from different
/// threads at the same time without sharing any mutable state. Dropping a
/// handle never affects the entry.
///
/// Once the cache that produced the handle is torn down, matching reports
/// [`MatchError::StaleHandle`]. A match that is already running keeps the
/// entry alive until it finishes.
pub struct RegexHandle<E: MatchingEngine = AutomataEngine> {
    entry: Weak<PatternEntry<E>>,
    engine: Arc<E>,
    scratch: E::Scratch,
}

impl<E: MatchingEngine> RegexHandle<E> {
    pub(crate) fn new(engine: Arc<E>, entry: &Arc<PatternEntry<E>>) -> Self {
        let scratch = engine.allocate_scratch(entry.compiled());
        Self {
            entry: Arc::downgrade(entry),
            engine,
            scratch,
        }
    }

    /// Returns whether the pattern matches anywhere in `subject`.
    ///
    /// No anchoring is imposed beyond what the pattern itself (or the
    /// `ANCHORED` option) asks for.
    pub fn is_match(&mut self, subject: &[u8]) -> Result<bool, MatchError> {
        let entry = self.entry.upgrade().ok_or(MatchError::StaleHandle)?;
        Ok(self.engine.is_match(entry.compiled(), &mut self.scratch, subject))
    }

    /// Same as [`is_match`](Self::is_match) but reports a stale handle as no
    /// match.
    pub fn matches(&mut self, subject: &[u8]) -> bool {
        match self.is_match(subject) {
            Ok(found) => found,
            Err(err) => {
                warn!("{}", err);
                false
            }
        }
    }

    /// Whether the entry behind this handle is still cached.
    pub fn is_valid(&self) -> bool {
        self.entry.strong_count() > 0
    }

    pub fn pattern(&self) -> Option<String> {
        self.entry.upgrade().map(|entry| entry.pattern().to_owned())
    }

    pub fn options(&self) -> Option<CompileOptions> {
        self.entry.upgrade().map(|entry| entry.options())
    }

    pub fn is_accelerated(&self) -> bool {
        self.entry.upgrade().is_some_and(|entry| entry.is_accelerated())
    }

    /// Whether both handles refer to the very same cache entry.
    pub fn same_entry(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.entry, &other.entry)
    }

    /// Creates another handle to the same entry with its own scratch.
    pub fn try_clone(&self) -> Result<Self, MatchError> {
        let entry = self.entry.upgrade().ok_or(MatchError::StaleHandle)?;
        Ok(Self::new(Arc::clone(&self.engine), &entry))
    }

    /// Releases the handle. The cache entry is left untouched.
    pub fn release(self) {}
}

impl<E: MatchingEngine> fmt::Debug for RegexHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexHandle")
            .field("pattern", &self.pattern())
            .field("valid", &self.is_valid())
            .finish()
    }
}
