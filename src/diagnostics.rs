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

use std::fmt;

/// Aggregate statistics over the entries of one cache instance.
///
/// Always recomputed from the entries, never stored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub count: usize,
    /// Mean length of the cached pattern texts in bytes, `0.0` when empty.
    pub average_pattern_length: f64,
}

impl CacheStats {
    pub(crate) fn from_lengths(lengths: impl IntoIterator<Item = usize>) -> Self {
        let (count, total) = lengths
            .into_iter()
            .fold((0usize, 0usize), |(count, total), len| (count + 1, total + len));
        let average_pattern_length = if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        };
        Self { count, average_pattern_length }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = itoa::Buffer::new();
        f.write_str("Cache entries: ")?;
        f.write_str(buf.format(self.count))?;
        if self.count > 0 {
            write!(f, "\nAvg. key length: {:.2}", self.average_pattern_length)?;
        }
        Ok(())
    }
}

/// Cached pattern texts in unspecified order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatternListing(pub Vec<String>);

impl PatternListing {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for PatternListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pattern in &self.0 {
            writeln!(f, "Pattern: {}", pattern)?;
        }
        Ok(())
    }
}
