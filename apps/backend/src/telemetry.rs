use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Applied when RUST_LOG is unset: full detail for this crate, the framework
/// at info, the SQL layers capped at warn.
const DEFAULT_FILTER: &str =
    "info,chess_teams_backend=debug,actix_web=info,sqlx=warn,sea_orm=warn";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::DEFAULT_FILTER;

    #[test]
    fn default_filter_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
