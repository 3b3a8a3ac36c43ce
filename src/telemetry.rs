use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Shape of the log lines written to stderr
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or(EnvFilter::try_new("info"))
        .unwrap()
}

/// Initialize tracing
pub fn init(format: LogFormat) {
    // stdout carries the command output, so logs always go to stderr
    let logger = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Decide on layers
    let collector = match format {
        LogFormat::Compact => Registry::default()
            .with(logger.compact().boxed())
            .with(env_filter()),
        LogFormat::Json => Registry::default()
            .with(logger.json().boxed())
            .with(env_filter()),
    };

    // Initialize tracing
    tracing::subscriber::set_global_default(collector).unwrap();
}
