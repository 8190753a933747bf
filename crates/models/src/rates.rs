use serde::{Deserialize, Serialize};

use crate::catalog::SERVICES;
use crate::errors::ModelError;

/// Key into the remote rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateKey {
    PopGypsum,
    Pvc,
    WallMolding,
}

impl RateKey {
    pub const ALL: [RateKey; 3] = [RateKey::PopGypsum, RateKey::Pvc, RateKey::WallMolding];

    pub fn as_str(&self) -> &'static str {
        match self {
            RateKey::PopGypsum => "popGypsum",
            RateKey::Pvc => "pvc",
            RateKey::WallMolding => "wallMolding",
        }
    }

    /// Catalog default for this key, if any service priced by it carries one.
    pub fn default_rate(&self) -> Option<u64> {
        SERVICES
            .iter()
            .find(|s| s.rate_key() == Some(*self))
            .and_then(|s| s.default_rate())
    }
}

/// Live price per square foot for each rate key, as configured by the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRate {
    pub pop_gypsum: u64,
    pub pvc: u64,
    pub wall_molding: u64,
}

impl ServiceRate {
    /// Rate for `key`. A zero rate counts as unset.
    pub fn get(&self, key: RateKey) -> Option<u64> {
        let value = match key {
            RateKey::PopGypsum => self.pop_gypsum,
            RateKey::Pvc => self.pvc,
            RateKey::WallMolding => self.wall_molding,
        };
        (value > 0).then_some(value)
    }

    /// Table built from the catalog defaults; used while the backend is unreachable.
    pub fn catalog_defaults() -> Self {
        Self {
            pop_gypsum: RateKey::PopGypsum.default_rate().unwrap_or_default(),
            pvc: RateKey::Pvc.default_rate().unwrap_or_default(),
            wall_molding: RateKey::WallMolding.default_rate().unwrap_or_default(),
        }
    }

    /// Rates pushed by the admin must all be positive.
    pub fn validate(&self) -> Result<(), ModelError> {
        for key in RateKey::ALL {
            if self.get(key).is_none() {
                return Err(ModelError::Validation(format!("{} rate must be greater than 0", key.as_str())));
            }
        }
        Ok(())
    }
}

impl Default for ServiceRate {
    fn default() -> Self {
        Self::catalog_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_catalog() {
        let rates = ServiceRate::catalog_defaults();
        assert_eq!(rates, ServiceRate { pop_gypsum: 65, pvc: 110, wall_molding: 100 });
    }

    #[test]
    fn zero_rate_is_unset() {
        let rates = ServiceRate { pop_gypsum: 0, pvc: 120, wall_molding: 90 };
        assert_eq!(rates.get(RateKey::PopGypsum), None);
        assert_eq!(rates.get(RateKey::Pvc), Some(120));
        assert!(rates.validate().is_err());
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(ServiceRate::catalog_defaults()).unwrap();
        assert_eq!(json["popGypsum"], 65);
        assert_eq!(json["wallMolding"], 100);
        let key: RateKey = serde_json::from_str("\"wallMolding\"").unwrap();
        assert_eq!(key, RateKey::WallMolding);
    }
}
