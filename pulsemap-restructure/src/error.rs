use thiserror::Error;

pub type ShapeResult<T> = Result<T, ShapeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Expected {
    #[strum(to_string = "an object of pulse series")]
    PulseMap,
    #[strum(to_string = "a valid sensor key")]
    SensorKey,
    #[strum(to_string = "an array of pulses")]
    PulseSeries,
    #[strum(to_string = "a pulse object")]
    Pulse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PulseField {
    #[strum(to_string = "charge")]
    Charge,
    #[strum(to_string = "time")]
    Time,
}

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("Input Type Error at {location}: expected {expected}, found {found}")]
    InputType {
        location: String,
        expected: Expected,
        found: String,
    },
    #[error("Missing Field Error: pulse {index} of sensor '{key}' lacks a numeric {field}")]
    MissingField {
        key: String,
        index: usize,
        field: PulseField,
    },
}
