use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Install the global tracing subscriber for the given environment.
///
/// `local` logs human-readable text at debug level, `dev` logs JSON at debug
/// level and `prod` logs JSON at info level. `RUST_LOG` overrides the level.
pub fn init(env: Environment) {
    let default_level = match env {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match env {
        Environment::Local => builder.init(),
        Environment::Dev | Environment::Prod => builder.json().init(),
    }
}
