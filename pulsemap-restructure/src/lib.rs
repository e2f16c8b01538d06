//! This crate flattens a map of per-sensor pulse series into the form
//! consumed by vectorised feature extraction: one flat sequence of charges,
//! one flat sequence of times, and per-sensor lookups of both.
//!
//! The flat sequences are always the per-sensor sequences concatenated in the
//! map's iteration order. Typical usage may look like:
//! ```rust
//! use pulsemap_restructure::{PulseMap, RecoPulse, restructure_pulsemap};
//!
//! let pulse_map = PulseMap::from([
//!     ("A", vec![RecoPulse::new(2.0, 20.0), RecoPulse::new(3.0, 30.0)]),
//!     ("B", vec![RecoPulse::new(4.0, 40.0)]),
//! ]);
//! let (charges, times, per_key_times, per_key_charges) =
//!     restructure_pulsemap(&pulse_map).into_tuple();
//!
//! assert_eq!(charges, vec![2.0, 3.0, 4.0]);
//! assert_eq!(times, vec![20.0, 30.0, 40.0]);
//! assert_eq!(per_key_times["A"], vec![20.0, 30.0]);
//! assert_eq!(per_key_charges["B"], vec![4.0]);
//! ```

pub mod error;
pub mod pulse;
pub mod restructure;
pub mod shape;

use indexmap::IndexMap;

pub use error::{Expected, PulseField, ShapeError, ShapeResult};
pub use pulse::{PulseLike, RecoPulse};
pub use restructure::{
    RestructuredPulses, RestructuredTuple, SensorKey, restructure_owned_pulsemap,
    restructure_pairs, restructure_pulsemap,
};
pub use shape::{pulse_map_from_value, restructure_value};

/// Pulse series keyed by sensor, iterated in insertion order.
pub type PulseMap<K, P> = IndexMap<K, Vec<P>>;
