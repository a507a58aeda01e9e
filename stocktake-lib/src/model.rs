//! Count domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A structure (store/warehouse) a count session is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: u32,
    pub name: String,
}

/// One sellable unit of a product with its multiplier against the base
/// unit (e.g. piece = 1, pack = 6, case = 24).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub multiplier: f64,
}

impl Unit {
    pub fn new(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            multiplier,
        }
    }
}

/// A product that can be counted.
///
/// Products carry up to several barcodes (different packagings scan to
/// different codes) and the units quantities can be recorded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub name: String,
    pub barcodes: Vec<String>,
    pub units: Vec<Unit>,
}

impl Product {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            barcodes: Vec::new(),
            units: vec![Unit::new("piece", 1.0)],
        }
    }

    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcodes.push(barcode.into());
        self
    }

    pub fn unit(mut self, name: impl Into<String>, multiplier: f64) -> Self {
        self.units.push(Unit::new(name, multiplier));
        self
    }

    /// Whether `query` matches this product's code, a barcode, or
    /// (case-insensitively) part of its name.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }
        self.code.eq_ignore_ascii_case(query)
            || self.barcodes.iter().any(|b| b == query)
            || self.name.to_lowercase().contains(&query.to_lowercase())
    }

    pub fn has_unit(&self, unit: &str) -> bool {
        self.units.iter().any(|u| u.name == unit)
    }
}

/// Lifecycle of a count session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountStatus {
    Draft,
    Open,
    Closed,
}

impl CountStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// A counting session scoped to one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountSession {
    pub id: Uuid,
    pub name: String,
    pub warehouse: Warehouse,
    pub status: CountStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl CountSession {
    pub fn is_open(&self) -> bool {
        self.status == CountStatus::Open
    }
}

/// One recorded quantity of one product in one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountedItem {
    pub id: Uuid,
    pub session_id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub unit: String,
    pub quantity: f64,
    pub counted_by: String,
    pub counted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_matches_code_barcode_and_name() {
        let product = Product::new("P-100", "Granulated Sugar 1kg").barcode("8690000000017");

        assert!(product.matches("p-100"));
        assert!(product.matches("8690000000017"));
        assert!(product.matches("sugar"));
        assert!(!product.matches("flour"));
        assert!(!product.matches(""));
    }

    #[test]
    fn base_unit_is_always_present() {
        let product = Product::new("P-1", "Water").unit("pack", 6.0);
        assert!(product.has_unit("piece"));
        assert!(product.has_unit("pack"));
        assert!(!product.has_unit("pallet"));
    }
}
