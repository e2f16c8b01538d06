mod tracer_engine;

pub use tracer_engine::{TracerEngine, TracerError, TracerOptions};

/// Should be called at the start of each binary.
/// The crate named in the default filter is the crate the macro is invoked from.
#[macro_export]
macro_rules! init_tracer {
    ($level:expr) => {{
        $crate::tracer::TracerEngine::new($crate::tracer::TracerOptions {
            crate_name: env!("CARGO_CRATE_NAME"),
            default_level: $level,
        })
    }};
}
