use std::sync::atomic::Ordering;

use crate::{
    config::CacheConfig,
    discipline::{CacheProvider, ConcurrencyMode},
    errors::{AllocationError, CacheError, CompileError, MatchError},
    options::CompileOptions,
};

use super::{counting_engine::CountingEngine, init_logging};

const PATTERNS: &[&str] = &[
    "^hello.*world$",
    r"\d{3}-\d{4}",
    "colou?r",
    r"\bfoo\b",
    "a|b|c",
    "^$",
    r"[[:alpha:]]+\d",
    "(ab)+c",
    r"\w+@\w+\.com",
    "é+",
];

const SUBJECTS: &[&str] = &[
    "",
    "hello awesome world",
    "bye world",
    "call 555-1234 now",
    "color and colour",
    "a foo b",
    "foobar",
    "xyz",
    "abc1",
    "ababc",
    "mail me@example.com",
    "café",
];

fn all_configs() -> Vec<CacheConfig> {
    let mut configs = Vec::new();
    for mode in [ConcurrencyMode::SharedGlobal, ConcurrencyMode::PerThread] {
        for acceleration in [true, false] {
            configs.push(CacheConfig::new(mode).with_acceleration(acceleration));
        }
    }
    configs
}

#[test]
fn end_to_end_scenario() {
    init_logging();
    for config in all_configs() {
        let context = CacheProvider::new(config).context();
        let mut handle = context.compile("^hello.*world$", CompileOptions::NONE).unwrap();
        assert_eq!(handle.is_match(b"hello awesome world"), Ok(true));
        assert_eq!(handle.is_match(b"bye world"), Ok(false));
        handle.release();
        // releasing the handle leaves the entry in place
        assert!(context.contains("^hello.*world$"));
    }
}

#[test]
fn matches_agree_with_reference_engine() {
    init_logging();
    for config in all_configs() {
        let context = CacheProvider::new(config).context();
        for pattern in PATTERNS {
            let reference = regex::bytes::Regex::new(pattern).unwrap();
            let mut handle = context.compile(pattern, CompileOptions::NONE).unwrap();
            for subject in SUBJECTS {
                assert_eq!(
                    handle.is_match(subject.as_bytes()),
                    Ok(reference.is_match(subject.as_bytes())),
                    "pattern {:?} on {:?} with {:?}",
                    pattern,
                    subject,
                    config
                );
            }
        }
        assert_eq!(context.stats().count, PATTERNS.len());
    }
}

#[test]
fn options_agree_with_reference_engine() {
    init_logging();
    let cases = [
        ("hello", CompileOptions::CASELESS, "(?i)hello"),
        ("^b$", CompileOptions::MULTILINE, "(?m)^b$"),
        ("a.c", CompileOptions::DOTALL, "(?s)a.c"),
        ("a b c", CompileOptions::EXTENDED, "(?x)a b c"),
        ("world", CompileOptions::ANCHORED, r"\A(?:world)"),
        (r"^\w+$", CompileOptions::NO_UNICODE, r"(?-u)^\w+$"),
    ];
    let subjects = ["HELLO", "a\nb\nc", "a\nc", "abc", "hello world", "world peace", "é", "wörld"];
    for config in all_configs() {
        let accelerate = config.acceleration;
        let context = CacheProvider::new(config).context();
        for (pattern, options, inline) in cases {
            let reference = regex::bytes::Regex::new(inline).unwrap();
            let mut handle = context.compile(pattern, options).unwrap();
            assert_eq!(handle.options(), Some(options));
            assert_eq!(handle.is_accelerated(), accelerate, "pattern {:?} with {}", pattern, options);
            for subject in subjects {
                assert_eq!(
                    handle.matches(subject.as_bytes()),
                    reference.is_match(subject.as_bytes()),
                    "pattern {:?} with {} on {:?} (accelerated: {})",
                    pattern,
                    options,
                    subject,
                    accelerate
                );
            }
        }
    }
}

#[test]
fn compiling_twice_returns_the_same_entry() {
    init_logging();
    for mode in [ConcurrencyMode::SharedGlobal, ConcurrencyMode::PerThread] {
        let provider = CacheProvider::with_engine(CacheConfig::new(mode), CountingEngine::default());
        let context = provider.context();
        for pattern in PATTERNS {
            let mut first = context.compile(pattern, CompileOptions::NONE).unwrap();
            let mut second = context.compile(pattern, CompileOptions::NONE).unwrap();
            assert!(first.same_entry(&second));
            for subject in SUBJECTS {
                assert_eq!(first.is_match(subject.as_bytes()), second.is_match(subject.as_bytes()));
            }
        }
        assert_eq!(context.stats().count, PATTERNS.len());
        assert_eq!(provider.engine().compiles(), PATTERNS.len());
        // one scratch per handle, never shared
        assert_eq!(provider.engine().scratches.load(Ordering::SeqCst), 2 * PATTERNS.len());
    }
}

#[test]
fn teardown_resets_state() {
    init_logging();
    let provider = CacheProvider::with_engine(CacheConfig::default(), CountingEngine::default());
    let context = provider.context();
    let mut old = context.compile("^a$", CompileOptions::NONE).unwrap();
    assert!(old.matches(b"a"));

    context.teardown();
    assert_eq!(context.stats().count, 0);
    assert!(context.list_patterns().into_inner().is_empty());
    assert!(!old.is_valid());
    assert_eq!(old.is_match(b"a"), Err(MatchError::StaleHandle));
    assert!(!old.matches(b"a"));
    assert_eq!(old.pattern(), None);
    assert_eq!(old.try_clone().unwrap_err(), MatchError::StaleHandle);

    let mut fresh = context.compile("^a$", CompileOptions::NONE).unwrap();
    assert!(!fresh.same_entry(&old));
    assert_eq!(fresh.is_match(b"a"), Ok(true));
    assert_eq!(provider.engine().compiles(), 2);
    assert_eq!(context.stats().count, 1);
}

#[test]
fn listing_returns_cached_patterns() {
    init_logging();
    for mode in [ConcurrencyMode::SharedGlobal, ConcurrencyMode::PerThread] {
        let context = CacheProvider::new(CacheConfig::new(mode)).context();
        context.compile("^a$", CompileOptions::NONE).unwrap();
        context.compile("^b$", CompileOptions::NONE).unwrap();
        context.compile("^a$", CompileOptions::NONE).unwrap();
        let mut patterns = context.list_patterns().into_inner();
        patterns.sort();
        assert_eq!(patterns, vec!["^a$".to_owned(), "^b$".to_owned()]);

        let stats = context.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_pattern_length, 3.0);
    }
}

#[test]
fn compile_errors_create_no_entry() {
    init_logging();
    for mode in [ConcurrencyMode::SharedGlobal, ConcurrencyMode::PerThread] {
        let provider = CacheProvider::with_engine(CacheConfig::new(mode), CountingEngine::default());
        let context = provider.context();
        let err = context.compile("hello(world", CompileOptions::NONE).unwrap_err();
        let CacheError::Compile(CompileError { offset, reason }) = &err else {
            panic!("expected a compile error, got {:?}", err);
        };
        assert_eq!(*offset, 5);
        assert!(!reason.is_empty());
        assert_eq!(context.stats().count, 0);

        // no negative caching, a retry compiles again
        assert!(context.compile("hello(world", CompileOptions::NONE).is_err());
        assert_eq!(provider.engine().compiles(), 2);
    }
}

#[test]
fn size_limit_breach_is_an_allocation_error() {
    init_logging();
    let config = CacheConfig::default().with_size_limits(128, 128);
    let context = CacheProvider::new(config).context();
    let err = context.compile(r"\w{500}", CompileOptions::NONE).unwrap_err();
    assert_eq!(err, CacheError::Allocation(AllocationError { limit: 128 }));
    assert!(!context.contains(r"\w{500}"));
}

#[test]
fn acceleration_can_be_disabled() {
    init_logging();
    let provider = CacheProvider::with_engine(
        CacheConfig::default().with_acceleration(false),
        CountingEngine::default(),
    );
    let context = provider.context();
    let mut handle = context.compile("abc", CompileOptions::NONE).unwrap();
    assert!(!handle.is_accelerated());
    assert!(handle.matches(b"xxabcxx"));
    assert_eq!(provider.engine().accelerations.load(Ordering::SeqCst), 0);
    assert_eq!(provider.engine().skipped_accelerations.load(Ordering::SeqCst), 1);

    let accelerated = CacheProvider::new(CacheConfig::default()).context();
    let handle = accelerated.compile("abc", CompileOptions::NONE).unwrap();
    assert!(handle.is_accelerated());
}

#[test]
fn default_instance_round_trip() {
    init_logging();
    let pattern = "^default-instance-[0-9]+$";
    let mut handle = crate::compile(pattern, CompileOptions::NONE).unwrap();
    assert!(handle.matches(b"default-instance-42"));
    assert!(!handle.matches(b"default-instance-"));
    assert!(crate::list_patterns().iter().any(|p| p == pattern));
    assert!(crate::cache_stats().count >= 1);
    crate::print_patterns();
    crate::print_stats();
    handle.release();
}
