use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Flat,
    Office,
    Shop,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [PropertyType::Flat, PropertyType::Office, PropertyType::Shop];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Flat => "Flat",
            PropertyType::Office => "Office",
            PropertyType::Shop => "Shop",
        }
    }
}

impl FromStr for PropertyType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ModelError::Parse(format!("unknown property type: {s}")))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_values_only() {
        assert_eq!("Office".parse::<PropertyType>(), Ok(PropertyType::Office));
        assert!("office".parse::<PropertyType>().is_err());
        assert!("Villa".parse::<PropertyType>().is_err());
    }
}
