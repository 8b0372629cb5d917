/// Install the global tracing subscriber for an embedding application.
///
/// `RUST_LOG` controls the filter; `LOG_FORMAT=json` switches to JSON
/// output. Call once at startup — panics if a subscriber is already set.
pub fn init_tracing() {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "campusmart=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}
