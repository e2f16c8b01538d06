//! Checks the shape of untyped pulse data before it reaches the restructurer.
//!
//! A pulse map arrives as a JSON object whose members are sensor keys, each
//! holding an array of `{"charge": .., "time": ..}` objects. Member order is
//! the order the sensors are visited in. The whole document is checked before
//! anything is restructured, so an error never comes with partial output.

use crate::{
    PulseMap, RecoPulse, RestructuredPulses, SensorKey,
    error::{Expected, PulseField, ShapeError, ShapeResult},
    restructure_pairs,
};
use pulsemap_common::Real;
use serde_json::{Map, Value};
use std::{fmt::Display, str::FromStr};
use tracing::warn;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn numeric_field(
    pulse: &Map<String, Value>,
    field: PulseField,
    key: &str,
    index: usize,
) -> ShapeResult<Real> {
    pulse
        .get(&field.to_string())
        .and_then(Value::as_f64)
        .ok_or_else(|| ShapeError::MissingField {
            key: key.to_owned(),
            index,
            field,
        })
}

fn pulse_from_value(value: &Value, key: &str, index: usize) -> ShapeResult<RecoPulse<Real>> {
    let pulse = value.as_object().ok_or_else(|| ShapeError::InputType {
        location: format!("pulse {index} of sensor '{key}'"),
        expected: Expected::Pulse,
        found: kind_of(value).to_owned(),
    })?;
    Ok(RecoPulse::new(
        numeric_field(pulse, PulseField::Charge, key, index)?,
        numeric_field(pulse, PulseField::Time, key, index)?,
    ))
}

fn series_from_value(value: &Value, key: &str) -> ShapeResult<Vec<RecoPulse<Real>>> {
    value
        .as_array()
        .ok_or_else(|| ShapeError::InputType {
            location: format!("pulses of sensor '{key}'"),
            expected: Expected::PulseSeries,
            found: kind_of(value).to_owned(),
        })?
        .iter()
        .enumerate()
        .map(|(index, pulse)| pulse_from_value(pulse, key, index))
        .collect()
}

/// Checks every member of a pulse map object, keeping document order and
/// any member names that parse to the same key.
fn pairs_from_value<K>(value: &Value) -> ShapeResult<Vec<(K, Vec<RecoPulse<Real>>)>>
where
    K: SensorKey + FromStr,
    K::Err: Display,
{
    let members = value.as_object().ok_or_else(|| ShapeError::InputType {
        location: "pulse map".to_owned(),
        expected: Expected::PulseMap,
        found: kind_of(value).to_owned(),
    })?;

    members
        .iter()
        .map(|(name, series)| {
            let key = name.parse::<K>().map_err(|e| ShapeError::InputType {
                location: "pulse map".to_owned(),
                expected: Expected::SensorKey,
                found: format!("'{name}' ({e})"),
            })?;
            Ok((key, series_from_value(series, name)?))
        })
        .collect()
}

/// Builds a typed pulse map from untyped data, parsing each member name as `K`.
///
/// Two member names that parse to the same key keep the later pulse series.
pub fn pulse_map_from_value<K>(value: &Value) -> ShapeResult<PulseMap<K, RecoPulse<Real>>>
where
    K: SensorKey + FromStr,
    K::Err: Display,
{
    let pairs = pairs_from_value::<K>(value)?;
    let mut pulse_map = PulseMap::with_capacity(pairs.len());
    for (key, series) in pairs {
        if let Some(previous) = pulse_map.insert(key.clone(), series) {
            warn!(
                "Sensor {key:?} duplicates an earlier key, discarding {0} earlier pulses",
                previous.len()
            );
        }
    }
    Ok(pulse_map)
}

/// Checks the shape of `value` and, if it is a pulse map, restructures it.
///
/// Members whose names parse to the same key all feed the flat sequences,
/// while the per-key maps keep the later series.
#[tracing::instrument(skip_all, level = "debug", err(level = "debug"))]
pub fn restructure_value<K>(value: &Value) -> ShapeResult<RestructuredPulses<K, Real>>
where
    K: SensorKey + FromStr,
    K::Err: Display,
{
    let pairs = pairs_from_value::<K>(value)?;
    Ok(restructure_pairs(pairs))
}
