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

use thiserror::Error;

/// The engine rejected the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to compile pattern at offset {offset}: {reason}")]
pub struct CompileError {
    /// Byte offset into the pattern text where compilation failed.
    pub offset: usize,
    pub reason: String,
}

/// The compiled program would not fit in the configured size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Compiled pattern exceeds the size limit of {limit} bytes")]
pub struct AllocationError {
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("{0}")]
    Allocation(#[from] AllocationError),
}

/// Errors that can occur while matching through a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MatchError {
    /// The entry referenced by the handle was released by cache teardown.
    #[error("Handle refers to an entry released by cache teardown")]
    StaleHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {variable}")]
    InvalidValue { variable: String, value: String },
}
