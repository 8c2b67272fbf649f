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

use log::{debug, warn};

use crate::{
    errors::CacheError, handle::RegexHandle, interfaces::MatchingEngine, options::CompileOptions,
};

/// Unit stored in a cache: the pattern text together with its compiled form.
///
/// Entries are immutable once built and owned by exactly one cache; handles
/// only keep weak references to them.
pub(crate) struct PatternEntry<E: MatchingEngine> {
    pattern: Box<str>,
    options: CompileOptions,
    compiled: E::Compiled,
    accelerated: bool,
}

impl<E: MatchingEngine> PatternEntry<E> {
    pub(crate) fn build(
        engine: &E,
        pattern: &str,
        options: CompileOptions,
        accelerate: bool,
    ) -> Result<Self, CacheError> {
        let mut compiled = engine.compile(pattern, options)?;
        let accelerated = if accelerate {
            engine.enable_acceleration(&mut compiled)
        } else {
            engine.skip_acceleration(&mut compiled);
            false
        };
        debug!(
            "Compiled pattern {:?} with options {} (accelerated: {})",
            pattern, options, accelerated
        );
        Ok(Self {
            pattern: pattern.into(),
            options,
            compiled,
            accelerated,
        })
    }

    pub(crate) fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn options(&self) -> CompileOptions {
        self.options
    }

    pub(crate) fn compiled(&self) -> &E::Compiled {
        &self.compiled
    }

    pub(crate) fn is_accelerated(&self) -> bool {
        self.accelerated
    }
}

/// Hands out a new handle to a cached entry.
///
/// The pattern text alone is the key, so a request with other `options`
/// gets the program compiled with the cached ones.
pub(crate) fn handle_for<E: MatchingEngine>(
    engine: &Arc<E>,
    entry: &Arc<PatternEntry<E>>,
    options: CompileOptions,
) -> RegexHandle<E> {
    if entry.options != options {
        warn!(
            "Pattern {:?} is cached with options {}, ignoring requested {}",
            entry.pattern, entry.options, options
        );
    }
    RegexHandle::new(Arc::clone(engine), entry)
}
