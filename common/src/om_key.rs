use crate::{OmNumber, PmtNumber, StringNumber};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};
use thiserror::Error;

/// Identifies a single optical module (and PMT within it) of the detector.
///
/// Keys order by string, then module, then PMT, and are written as
/// `string,om,pmt` when displayed or serialised.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OmKey {
    pub string: StringNumber,
    pub om: OmNumber,
    pub pmt: PmtNumber,
}

impl OmKey {
    pub fn new(string: StringNumber, om: OmNumber, pmt: PmtNumber) -> Self {
        Self { string, om, pmt }
    }
}

impl Display for OmKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0},{1},{2}", self.string, self.om, self.pmt)
    }
}

#[derive(Debug, Error)]
pub enum OmKeyParseError {
    #[error("Incorrect number of components in OmKey, expected pattern 'string,om[,pmt]', got '{0}'")]
    ComponentCount(String),
    #[error("Invalid OmKey component: {0}")]
    Component(#[from] ParseIntError),
}

impl FromStr for OmKey {
    type Err = OmKeyParseError;

    /// Accepts `string,om,pmt`, or `string,om` in which case the PMT is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vals: Vec<_> = s.split(',').map(str::trim).collect();
        match vals.as_slice() {
            [string, om] => Ok(OmKey::new(string.parse()?, om.parse()?, 0)),
            [string, om, pmt] => Ok(OmKey::new(string.parse()?, om.parse()?, pmt.parse()?)),
            _ => Err(OmKeyParseError::ComponentCount(s.to_owned())),
        }
    }
}

impl Serialize for OmKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OmKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
