mod config;
mod diagnostics;
mod discipline;
mod engine;
mod entry;
mod errors;
mod handle;
mod interfaces;
mod local_cache;
mod options;
mod regexp_cache;

#[cfg(test)]
mod tests;

use std::sync::LazyLock;

use log::warn;

pub use config::{CacheConfig, ENV_PREFIX};
pub use diagnostics::{CacheStats, PatternListing};
pub use discipline::{CacheContext, CacheProvider, ConcurrencyMode};
pub use engine::{AutomataEngine, AutomataProgram, AutomataScratch, EngineLimits};
pub use errors::{AllocationError, CacheError, CompileError, ConfigError, MatchError};
pub use handle::RegexHandle;
pub use interfaces::MatchingEngine;
pub use local_cache::LocalRegexCache;
pub use options::{CompileOptions, OptionFlag};
pub use regexp_cache::RegexCache;

/// Process-wide provider used by the free functions of this crate, configured
/// from the `RXCACHE_*` environment variables on first use.
pub static DEFAULT_PROVIDER: LazyLock<CacheProvider> = LazyLock::new(|| {
    let config = CacheConfig::from_env().unwrap_or_else(|err| {
        warn!("{}, using default cache configuration", err);
        CacheConfig::default()
    });
    CacheProvider::new(config)
});

thread_local! {
    static CONTEXT: CacheContext = DEFAULT_PROVIDER.context();
}

/// Mode of the default provider.
pub fn mode() -> ConcurrencyMode {
    DEFAULT_PROVIDER.mode()
}

/// Compiles `pattern` through the default cache.
///
/// ```
/// use rxcache::CompileOptions;
///
/// let mut handle = rxcache::compile("^hello.*world$", CompileOptions::NONE).unwrap();
/// assert!(handle.matches(b"hello awesome world"));
/// assert!(!handle.matches(b"bye world"));
/// ```
pub fn compile(pattern: &str, options: CompileOptions) -> Result<RegexHandle, CacheError> {
    CONTEXT.with(|context| context.compile(pattern, options))
}

/// Tears down the default cache visible from the calling thread.
pub fn teardown() {
    CONTEXT.with(|context| context.teardown())
}

/// Returns the texts held by the default cache visible from the calling
/// thread, in no particular order.
pub fn list_patterns() -> Vec<String> {
    CONTEXT.with(|context| context.list_patterns().into_inner())
}

/// Entry count and average pattern length of the default cache visible from
/// the calling thread.
///
/// ```
/// use rxcache::CompileOptions;
///
/// rxcache::compile("stats-[a-z]+", CompileOptions::NONE).unwrap();
/// assert!(rxcache::list_patterns().iter().any(|p| p == "stats-[a-z]+"));
/// assert!(rxcache::cache_stats().count >= 1);
/// ```
pub fn cache_stats() -> CacheStats {
    CONTEXT.with(|context| context.stats())
}

/// Writes one `Pattern: <text>` line per cached pattern to standard output.
pub fn print_patterns() {
    CONTEXT.with(|context| print!("{}", context.list_patterns()))
}

/// Writes the entry count and average pattern length to standard output.
pub fn print_stats() {
    println!("{}", cache_stats());
}
