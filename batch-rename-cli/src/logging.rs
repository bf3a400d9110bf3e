use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter directive, e.g. `batch_rename_core=debug`
pub const LOG_ENV: &str = "BATCH_RENAME_LOG";

/// Filter directive for a `-v` count when `BATCH_RENAME_LOG` is unset
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber.
///
/// Stdout is left alone so JSON output stays machine readable.
pub fn init_logging(verbose: u8, use_color: bool) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(use_color)
                .with_target(verbose > 1),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: failed to initialize logging: {e}");
    }
}
