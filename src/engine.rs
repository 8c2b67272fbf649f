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

use log::{trace, warn};
use regex_automata::{
    dfa::{dense, Automaton},
    meta,
    nfa::thompson,
    Anchored, Input,
};
use regex_syntax::{hir::Hir, ParserBuilder};

use crate::{
    errors::{AllocationError, CacheError, CompileError},
    interfaces::MatchingEngine,
    options::CompileOptions,
};

/// Default NFA size limit, same as the one `regex` uses.
pub const DEFAULT_NFA_SIZE_LIMIT: usize = 10 * (1 << 20);
/// Default limit for the accelerated DFA. Patterns that need more are
/// matched with the standard executor.
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    pub nfa_size_limit: usize,
    pub dfa_size_limit: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            nfa_size_limit: DEFAULT_NFA_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
        }
    }
}

/// Engine built on `regex-automata`.
///
/// The standard executor is a `meta::Regex` searched with an explicit
/// `meta::Cache`. Acceleration compiles the whole pattern into a dense DFA
/// ahead of time, so the hot path needs no lazy state building at all.
#[derive(Debug, Default, Clone)]
pub struct AutomataEngine {
    limits: EngineLimits,
}

pub struct AutomataProgram {
    regex: meta::Regex,
    /// Kept only until acceleration has been attempted.
    hir: Option<Hir>,
    dfa: Option<dense::DFA<Vec<u32>>>,
    anchored: bool,
}

impl AutomataProgram {
    pub fn is_accelerated(&self) -> bool {
        self.dfa.is_some()
    }
}

pub struct AutomataScratch {
    cache: meta::Cache,
}

impl AutomataEngine {
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    fn parse(&self, pattern: &str, options: CompileOptions) -> Result<Hir, CompileError> {
        let unicode = !options.contains(CompileOptions::NO_UNICODE);
        ParserBuilder::new()
            .case_insensitive(options.contains(CompileOptions::CASELESS))
            .multi_line(options.contains(CompileOptions::MULTILINE))
            .dot_matches_new_line(options.contains(CompileOptions::DOTALL))
            .ignore_whitespace(options.contains(CompileOptions::EXTENDED))
            .swap_greed(options.contains(CompileOptions::UNGREEDY))
            .unicode(unicode)
            .utf8(unicode)
            .build()
            .parse(pattern)
            .map_err(|err| syntax_error(&err))
    }

    fn build_dfa(&self, hir: &Hir) -> Result<dense::DFA<Vec<u32>>, String> {
        let nfa = thompson::Compiler::new()
            .configure(
                thompson::Config::new()
                    .nfa_size_limit(Some(self.limits.nfa_size_limit))
                    .which_captures(thompson::WhichCaptures::None),
            )
            .build_from_hir(hir)
            .map_err(|err| err.to_string())?;
        dense::Builder::new()
            .configure(
                dense::Config::new()
                    .dfa_size_limit(Some(self.limits.dfa_size_limit))
                    .determinize_size_limit(Some(self.limits.dfa_size_limit)),
            )
            .build_from_nfa(&nfa)
            .map_err(|err| err.to_string())
    }
}

impl MatchingEngine for AutomataEngine {
    type Compiled = AutomataProgram;
    type Scratch = AutomataScratch;

    fn compile(&self, pattern: &str, options: CompileOptions) -> Result<AutomataProgram, CacheError> {
        let hir = self.parse(pattern, options)?;
        let regex = meta::Regex::builder()
            .configure(meta::Config::new().nfa_size_limit(Some(self.limits.nfa_size_limit)))
            .build_from_hir(&hir)
            .map_err(build_error)?;
        Ok(AutomataProgram {
            regex,
            hir: Some(hir),
            dfa: None,
            anchored: options.contains(CompileOptions::ANCHORED),
        })
    }

    fn enable_acceleration(&self, compiled: &mut AutomataProgram) -> bool {
        let Some(hir) = compiled.hir.take() else {
            return compiled.dfa.is_some();
        };
        match self.build_dfa(&hir) {
            Ok(dfa) => {
                trace!("Built accelerated DFA of {} bytes", dfa.memory_usage());
                compiled.dfa = Some(dfa);
                true
            }
            Err(reason) => {
                warn!("Acceleration unavailable, using standard executor: {}", reason);
                false
            }
        }
    }

    fn skip_acceleration(&self, compiled: &mut AutomataProgram) {
        compiled.hir = None;
    }

    fn allocate_scratch(&self, compiled: &AutomataProgram) -> AutomataScratch {
        AutomataScratch { cache: compiled.regex.create_cache() }
    }

    fn is_match(&self, compiled: &AutomataProgram, scratch: &mut AutomataScratch, subject: &[u8]) -> bool {
        let anchored = if compiled.anchored { Anchored::Yes } else { Anchored::No };
        let input = Input::new(subject).anchored(anchored).earliest(true);
        if let Some(dfa) = compiled.dfa.as_ref() {
            match dfa.try_search_fwd(&input) {
                Ok(found) => return found.is_some(),
                // the DFA gave up on this subject, the meta regex never does
                Err(err) => trace!("Accelerated search failed, falling back: {}", err),
            }
        }
        compiled.regex.search_half_with(&mut scratch.cache, &input).is_some()
    }
}

fn syntax_error(err: &regex_syntax::Error) -> CompileError {
    match err {
        regex_syntax::Error::Parse(err) => CompileError {
            offset: err.span().start.offset,
            reason: err.kind().to_string(),
        },
        regex_syntax::Error::Translate(err) => CompileError {
            offset: err.span().start.offset,
            reason: err.kind().to_string(),
        },
        #[allow(unreachable_patterns)]
        _ => CompileError { offset: 0, reason: err.to_string() },
    }
}

fn build_error(err: meta::BuildError) -> CacheError {
    if let Some(limit) = err.size_limit() {
        return AllocationError { limit }.into();
    }
    match err.syntax_error() {
        Some(syntax) => syntax_error(syntax).into(),
        None => CompileError { offset: 0, reason: err.to_string() }.into(),
    }
}
