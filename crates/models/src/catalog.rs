//! Static service catalog.
//!
//! Service ids are the values the booking form submits and the keys the
//! estimate calculator looks up.

use crate::rates::RateKey;

/// How a service is priced: per square foot, or only after an on-site visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    PerArea {
        rate_key: RateKey,
        default_rate: Option<u64>,
    },
    Inspection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub price_text: &'static str,
    pub description: &'static str,
    pub pricing: Pricing,
}

impl Service {
    pub fn rate_key(&self) -> Option<RateKey> {
        match self.pricing {
            Pricing::PerArea { rate_key, .. } => Some(rate_key),
            Pricing::Inspection => None,
        }
    }

    pub fn default_rate(&self) -> Option<u64> {
        match self.pricing {
            Pricing::PerArea { default_rate, .. } => default_rate.filter(|r| *r > 0),
            Pricing::Inspection => None,
        }
    }

    pub fn is_inspection_based(&self) -> bool {
        matches!(self.pricing, Pricing::Inspection)
    }
}

pub static SERVICES: [Service; 4] = [
    Service {
        id: "POP & Gypsum",
        name: "POP & Gypsum False Ceiling",
        price_text: "Starting at ₹65 per sq.ft",
        description: "Elegant and cost-effective ceiling designs for homes and offices.",
        pricing: Pricing::PerArea { rate_key: RateKey::PopGypsum, default_rate: Some(65) },
    },
    Service {
        id: "PVC",
        name: "PVC Ceiling Installation",
        price_text: "Starting at ₹110 per sq.ft",
        description: "Durable, waterproof and low maintenance ceiling solutions.",
        pricing: Pricing::PerArea { rate_key: RateKey::Pvc, default_rate: Some(110) },
    },
    Service {
        id: "Wall Molding",
        name: "Wall Molding & Decorative Panels",
        price_text: "Starting at ₹100 per sq.ft",
        description: "Modern decorative wall molding for premium interiors.",
        pricing: Pricing::PerArea { rate_key: RateKey::WallMolding, default_rate: Some(100) },
    },
    Service {
        id: "Gypsum Repair",
        name: "Gypsum Ceiling Repairing",
        price_text: "Inspection based pricing",
        description: "Crack repair, redesign and ceiling restoration services.",
        pricing: Pricing::Inspection,
    },
];

pub fn find_service(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.id == id)
}

pub fn is_known_service(id: &str) -> bool {
    find_service(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_service_is_priced_one_way() {
        for service in SERVICES.iter() {
            assert_ne!(service.is_inspection_based(), service.rate_key().is_some(), "{}", service.id);
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(find_service("PVC").map(|s| s.name), Some("PVC Ceiling Installation"));
        assert!(find_service("pvc").is_none());
        assert!(is_known_service("Gypsum Repair"));
    }
}
