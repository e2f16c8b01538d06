use num::Float;
use std::fmt::{Debug, Display};

/// Read-only view of a detected pulse, as provided by the upstream event model.
/// Only the charge and time of a pulse are consumed; both are returned in
/// the units of the source data.
pub trait PulseLike {
    type Real: Float + Debug;

    fn charge(&self) -> Self::Real;
    fn time(&self) -> Self::Real;
}

/// A reconstructed pulse recorded at a single sensor.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct RecoPulse<R>
where
    R: Float,
{
    pub charge: R,
    pub time: R,
}

impl<R> RecoPulse<R>
where
    R: Float,
{
    pub fn new(charge: R, time: R) -> Self {
        Self { charge, time }
    }
}

impl<R> PulseLike for RecoPulse<R>
where
    R: Float + Debug,
{
    type Real = R;

    fn charge(&self) -> R {
        self.charge
    }

    fn time(&self) -> R {
        self.time
    }
}

/// A `(charge, time)` pair.
impl<R> PulseLike for (R, R)
where
    R: Float + Debug,
{
    type Real = R;

    fn charge(&self) -> R {
        self.0
    }

    fn time(&self) -> R {
        self.1
    }
}

impl<R> Display for RecoPulse<R>
where
    R: Float + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{0},{1}", self.charge, self.time))
    }
}
