use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins when set; `--verbose` beats a configured level.
fn default_directive(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "slcsp=debug,info".to_string(),
        (false, Some(level)) => format!("slcsp={}", level),
        (false, None) => "slcsp=info".to_string(),
    }
}

// Logs go to stderr; stdout is reserved for the CSV result.
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(false, level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_applies_without_verbose() {
        assert_eq!(default_directive(false, Some("warn")), "slcsp=warn");
        assert_eq!(default_directive(false, None), "slcsp=info");
    }

    #[test]
    fn test_verbose_overrides_configured_level() {
        assert_eq!(default_directive(true, Some("warn")), "slcsp=debug,info");
    }
}
