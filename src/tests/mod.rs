mod cache_tests;

static ONCE: std::sync::Once = std::sync::Once::new();

fn init_logging() {
    ONCE.call_once(|| colog::default_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .init()
    );
}
