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

use crate::{errors::CacheError, options::CompileOptions};

/// Matching engine API used to isolate the caches from the underlying
/// regular expression implementation and allow different implementations
/// to be swapped in easily.
///
/// Compiled programs and scratch buffers are released by `Drop`.
pub trait MatchingEngine: Send + Sync + 'static {
    /// Engine representation of a compiled pattern. Shared between threads
    /// and never mutated after the entry holding it is published.
    type Compiled: Send + Sync + 'static;
    /// Per-matcher mutable state used while running a search.
    type Scratch: Send + 'static;

    /// Compiles `pattern` with the given `options`.
    fn compile(&self, pattern: &str, options: CompileOptions) -> Result<Self::Compiled, CacheError>;

    /// Best effort attempt to build a faster execution path for `compiled`.
    /// Returns `false` if the standard executor will be used.
    fn enable_acceleration(&self, compiled: &mut Self::Compiled) -> bool;

    /// Called instead of `enable_acceleration` when the cache runs without
    /// acceleration, to drop state kept only for building it.
    fn skip_acceleration(&self, _compiled: &mut Self::Compiled) {}

    /// Allocates scratch space sized for `compiled`.
    fn allocate_scratch(&self, compiled: &Self::Compiled) -> Self::Scratch;

    /// Returns whether `compiled` matches anywhere in `subject`, honouring only
    /// the anchoring of the pattern and its options.
    fn is_match(&self, compiled: &Self::Compiled, scratch: &mut Self::Scratch, subject: &[u8]) -> bool;
}
