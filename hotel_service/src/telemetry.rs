//! Process-wide tracing setup: pretty output for local work, flattened JSON
//! everywhere else, with panics routed through tracing.

use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Loads `.env`, installs the panic hook, and initializes the subscriber.
/// Returns the environment so `main` can reuse the decision.
pub fn init() -> Environment {
    dotenv::dotenv().ok();
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    let environment = Environment::new_or_prod();
    match environment {
        Environment::Local => {
            tracing_subscriber::fmt()
                .with_ansi(true)
                .with_env_filter(EnvFilter::from_default_env())
                .with_file(true)
                .with_line_number(true)
                .pretty()
                .init();
        }
        Environment::Develop | Environment::Production => {
            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_env_filter(EnvFilter::from_default_env())
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true)
                .init();
        }
    }

    environment
}
