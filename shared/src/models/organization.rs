//! Subdivision and material classification models

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseEnumError;

/// Kind of organizational unit that owns planning facts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubdivisionType {
    Warehouse,
    Production,
    Sales,
}

impl SubdivisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubdivisionType::Warehouse => "Warehouse",
            SubdivisionType::Production => "Production",
            SubdivisionType::Sales => "Sales",
        }
    }
}

impl std::fmt::Display for SubdivisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubdivisionType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Warehouse" => Ok(SubdivisionType::Warehouse),
            "Production" => Ok(SubdivisionType::Production),
            "Sales" => Ok(SubdivisionType::Sales),
            other => Err(ParseEnumError::new("subdivision type", other)),
        }
    }
}

impl TryFrom<String> for SubdivisionType {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether a material is bought in or produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    FinishedProduct,
    RawMaterial,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::FinishedProduct => "FinishedProduct",
            MaterialType::RawMaterial => "RawMaterial",
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialType::FinishedProduct => write!(f, "Finished Product"),
            MaterialType::RawMaterial => write!(f, "Raw Material"),
        }
    }
}

impl FromStr for MaterialType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FinishedProduct" => Ok(MaterialType::FinishedProduct),
            "RawMaterial" => Ok(MaterialType::RawMaterial),
            other => Err(ParseEnumError::new("material type", other)),
        }
    }
}

impl TryFrom<String> for MaterialType {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
