pub mod om_key;
pub mod tracer;

pub use om_key::{OmKey, OmKeyParseError};

pub type StringNumber = i32;
pub type OmNumber = u32;
pub type PmtNumber = u8;

/// The float type used wherever pulse data crosses an untyped boundary.
pub type Real = f64;
