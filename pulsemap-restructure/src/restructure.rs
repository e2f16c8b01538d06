use crate::{PulseLike, PulseMap};
use indexmap::IndexMap;
use num::Float;
use serde::Serialize;
use std::{fmt::Debug, hash::Hash, ops::Deref};
use tracing::warn;

/// Anything that can identify a sensor. Keys are never interpreted, only
/// compared, hashed and copied into the per-key maps.
pub trait SensorKey: Clone + Eq + Hash + Debug {}

impl<K> SensorKey for K where K: Clone + Eq + Hash + Debug {}

/// The flattened form of a pulse map.
///
/// `flat_charges` and `flat_times` are the concatenation of the per-key
/// sequences in key order. `per_key_times` and `per_key_charges` share their key
/// order, and entry `i` of each sequence refers to the same pulse.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RestructuredPulses<K, R>
where
    K: SensorKey,
    R: Float,
{
    pub flat_charges: Vec<R>,
    pub flat_times: Vec<R>,
    pub per_key_times: IndexMap<K, Vec<R>>,
    pub per_key_charges: IndexMap<K, Vec<R>>,
}

/// Flat charges, flat times, per-key times, per-key charges.
pub type RestructuredTuple<K, R> = (Vec<R>, Vec<R>, IndexMap<K, Vec<R>>, IndexMap<K, Vec<R>>);

impl<K, R> RestructuredPulses<K, R>
where
    K: SensorKey,
    R: Float + Debug,
{
    fn with_capacity(num_keys: usize, num_pulses: usize) -> Self {
        Self {
            flat_charges: Vec::with_capacity(num_pulses),
            flat_times: Vec::with_capacity(num_pulses),
            per_key_times: IndexMap::with_capacity(num_keys),
            per_key_charges: IndexMap::with_capacity(num_keys),
        }
    }

    fn push_sensor<P>(&mut self, key: K, pulses: &[P])
    where
        P: PulseLike<Real = R>,
    {
        let (charges, times): (Vec<R>, Vec<R>) = pulses
            .iter()
            .map(|pulse| (pulse.charge(), pulse.time()))
            .unzip();

        self.flat_charges.extend_from_slice(&charges);
        self.flat_times.extend_from_slice(&times);

        if self.per_key_times.insert(key.clone(), times).is_some() {
            warn!("Sensor {key:?} appears more than once, keeping its last pulse series");
        }
        self.per_key_charges.insert(key, charges);
    }

    pub fn num_sensors(&self) -> usize {
        self.per_key_charges.len()
    }

    pub fn num_pulses(&self) -> usize {
        self.flat_charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat_charges.is_empty() && self.per_key_charges.is_empty()
    }

    /// Returns the `(charges, times)` recorded for `key`.
    pub fn sensor(&self, key: &K) -> Option<(&[R], &[R])> {
        Option::zip(self.per_key_charges.get(key), self.per_key_times.get(key))
            .map(|(charges, times)| (charges.as_slice(), times.as_slice()))
    }

    pub fn into_tuple(self) -> RestructuredTuple<K, R> {
        (
            self.flat_charges,
            self.flat_times,
            self.per_key_times,
            self.per_key_charges,
        )
    }
}

/// Flattens a pulse map, visiting its sensors in the map's own iteration order.
///
/// Accepts any borrowed map whose values dereference to a slice of pulses,
/// so `&PulseMap`, `&BTreeMap<K, Vec<P>>` and the like all work. The input is
/// not modified.
#[tracing::instrument(skip_all, level = "debug", fields(num_keys, num_pulses))]
pub fn restructure_pulsemap<'a, K, S, P, M>(pulse_map: M) -> RestructuredPulses<K, P::Real>
where
    M: IntoIterator<Item = (&'a K, &'a S)>,
    M::IntoIter: Clone,
    K: SensorKey + 'a,
    S: Deref<Target = [P]> + 'a,
    P: PulseLike,
{
    let pairs = pulse_map.into_iter();
    let (num_keys, num_pulses) = pairs
        .clone()
        .fold((0, 0), |(keys, pulses), (_, series)| {
            (keys + 1, pulses + series.len())
        });

    let mut restructured = RestructuredPulses::with_capacity(num_keys, num_pulses);
    for (key, pulses) in pairs {
        restructured.push_sensor(key.clone(), pulses);
    }

    tracing::Span::current().record("num_keys", restructured.num_sensors());
    tracing::Span::current().record("num_pulses", restructured.num_pulses());
    restructured
}

/// Flattens an owned pulse map.
pub fn restructure_owned_pulsemap<K, P>(pulse_map: PulseMap<K, P>) -> RestructuredPulses<K, P::Real>
where
    K: SensorKey,
    P: PulseLike,
{
    restructure_pairs(pulse_map)
}

/// Flattens a sequence of `(key, pulses)` pairs in the order given.
///
/// Unlike a map, a sequence of pairs may repeat a key. Every pair contributes
/// to the flat sequences, while the per-key maps keep the last series seen for
/// the key at the position where the key first appeared.
#[tracing::instrument(skip_all, level = "debug", fields(num_keys, num_pulses))]
pub fn restructure_pairs<K, S, P, I>(pairs: I) -> RestructuredPulses<K, P::Real>
where
    I: IntoIterator<Item = (K, S)>,
    K: SensorKey,
    S: Deref<Target = [P]>,
    P: PulseLike,
{
    let pairs = pairs.into_iter();
    let mut restructured = RestructuredPulses::with_capacity(pairs.size_hint().0, 0);
    for (key, pulses) in pairs {
        restructured.push_sensor(key, &pulses);
    }

    tracing::Span::current().record("num_keys", restructured.num_sensors());
    tracing::Span::current().record("num_pulses", restructured.num_pulses());
    restructured
}
