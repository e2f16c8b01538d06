use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, filter::ParseError, layer::SubscriberExt};

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("Invalid Log Directive: {0}")]
    Directive(#[from] ParseError),
    #[error("Cannot Set Global Subscriber: {0}")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub struct TracerOptions<'a> {
    /// Name of the crate whose events are shown when `RUST_LOG` is unset.
    pub crate_name: &'a str,
    /// Level applied to `crate_name` when `RUST_LOG` is unset.
    pub default_level: LevelFilter,
}

impl TracerOptions<'_> {
    fn default_directive(&self) -> String {
        format!("{0}={1}", self.crate_name, self.default_level)
    }
}

/// This object initialises the stderr tracer.
/// Stdout is left free for the data a binary produces.
pub struct TracerEngine {
    from_env: bool,
}

impl TracerEngine {
    /// Initialises the stderr tracer for the crate
    /// #Arguments
    /// * `options` - The caller-specified instance of TracerOptions.
    /// #Returns
    /// An instance of TracerEngine, or an error if a global subscriber already exists.
    pub fn new(options: TracerOptions) -> Result<Self, TracerError> {
        let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();

        let stderr_tracer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        // This filter is applied to the stderr tracer
        let log_filter = build_filter(&options, from_env)?;

        let subscriber =
            tracing_subscriber::Registry::default().with(stderr_tracer.with_filter(log_filter));

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(Self { from_env })
    }

    /// True if the filter was taken from `RUST_LOG` rather than the options.
    pub fn is_from_env(&self) -> bool {
        self.from_env
    }
}

fn build_filter(options: &TracerOptions, from_env: bool) -> Result<EnvFilter, TracerError> {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());
    if from_env {
        Ok(builder.from_env_lossy())
    } else {
        Ok(builder.parse(options.default_directive())?)
    }
}
