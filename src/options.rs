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

use std::{fmt, ops::{BitOr, BitOrAssign}};

use strum::{EnumIter, IntoEnumIterator};

/// Bitmask of flags controlling how a pattern is compiled.
///
/// Values can be combined with `|`:
/// ```
/// use rxcache::CompileOptions;
///
/// let options = CompileOptions::CASELESS | CompileOptions::MULTILINE;
/// assert!(options.contains(CompileOptions::CASELESS));
/// assert!(!options.contains(CompileOptions::DOTALL));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompileOptions(u32);

impl CompileOptions {
    /// No flags set, the pattern is compiled as written.
    pub const NONE: Self = Self(0);
    /// Letters match both upper and lower case.
    pub const CASELESS: Self = Self(1 << 0);
    /// `^` and `$` match at line boundaries.
    pub const MULTILINE: Self = Self(1 << 1);
    /// `.` matches `\n` too.
    pub const DOTALL: Self = Self(1 << 2);
    /// Whitespace in the pattern is ignored and `#` starts a comment.
    pub const EXTENDED: Self = Self(1 << 3);
    /// Quantifiers are lazy by default, `?` makes them greedy.
    pub const UNGREEDY: Self = Self(1 << 4);
    /// The match must start at the first byte of the subject.
    pub const ANCHORED: Self = Self(1 << 5);
    /// Classes are byte oriented and the pattern may match invalid UTF-8.
    pub const NO_UNICODE: Self = Self(1 << 6);

    const ALL_BITS: u32 = (1 << 7) - 1;

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `None` if `bits` has any unknown flag set.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::ALL_BITS != 0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// Drops any unknown flag from `bits`.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Iterates the individual flags set in this mask.
    pub fn flags(self) -> impl Iterator<Item = OptionFlag> {
        OptionFlag::iter().filter(move |flag| self.contains(flag.options()))
    }
}

impl BitOr for CompileOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CompileOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl From<OptionFlag> for CompileOptions {
    fn from(flag: OptionFlag) -> Self {
        flag.options()
    }
}

impl fmt::Display for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        for (i, flag) in self.flags().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", flag)?;
        }
        Ok(())
    }
}

/// Single compile flag, mostly useful for iterating over what a
/// [`CompileOptions`] mask holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionFlag {
    Caseless,
    Multiline,
    Dotall,
    Extended,
    Ungreedy,
    Anchored,
    NoUnicode,
}

impl OptionFlag {
    pub const fn options(self) -> CompileOptions {
        match self {
            OptionFlag::Caseless => CompileOptions::CASELESS,
            OptionFlag::Multiline => CompileOptions::MULTILINE,
            OptionFlag::Dotall => CompileOptions::DOTALL,
            OptionFlag::Extended => CompileOptions::EXTENDED,
            OptionFlag::Ungreedy => CompileOptions::UNGREEDY,
            OptionFlag::Anchored => CompileOptions::ANCHORED,
            OptionFlag::NoUnicode => CompileOptions::NO_UNICODE,
        }
    }
}
