use serde::{Deserialize, Serialize};

/// One parsed purchase row, handed to the API layer for catalog resolution
/// and persistence. `product_code` is the raw alphanumeric code as read off
/// the receipt — it has not been resolved against the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_code: String,
    pub quantity: f64,
    /// Per-unit price. Absent when the receipt column layout only carries a
    /// row total (the windowed-lookahead grammar).
    pub unit_price: Option<f64>,
    /// Row total: computed as `quantity * unit_price` when the unit price is
    /// known, otherwise read directly from the receipt.
    pub line_total: Option<f64>,
}

impl LineItem {
    /// Whether the stored total agrees with `quantity * unit_price`.
    /// Vacuously true when either side is unknown.
    pub fn total_is_consistent(&self) -> bool {
        match (self.unit_price, self.line_total) {
            (Some(price), Some(total)) => (self.quantity * price - total).abs() < 1e-6,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_consistent_when_computed() {
        let item = LineItem {
            product_code: "101".into(),
            quantity: 2.5,
            unit_price: Some(10.0),
            line_total: Some(25.0),
        };
        assert!(item.total_is_consistent());
    }

    #[test]
    fn total_inconsistent_when_mismatched() {
        let item = LineItem {
            product_code: "101".into(),
            quantity: 2.0,
            unit_price: Some(10.0),
            line_total: Some(25.0),
        };
        assert!(!item.total_is_consistent());
    }

    #[test]
    fn total_vacuously_consistent_without_unit_price() {
        let item = LineItem {
            product_code: "12".into(),
            quantity: 2.0,
            unit_price: None,
            line_total: Some(450.0),
        };
        assert!(item.total_is_consistent());
    }

    #[test]
    fn serializes_optional_fields_as_null() {
        let item = LineItem {
            product_code: "12".into(),
            quantity: 2.0,
            unit_price: None,
            line_total: Some(450.0),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["product_code"], "12");
        assert!(json["unit_price"].is_null());
        assert_eq!(json["line_total"], 450.0);
    }

    #[test]
    fn deserializes_from_api_shape() {
        let item: LineItem = serde_json::from_str(
            r#"{"product_code":"4607","quantity":1.0,"unit_price":89.9,"line_total":89.9}"#,
        )
        .unwrap();
        assert_eq!(item.product_code, "4607");
        assert_eq!(item.unit_price, Some(89.9));
    }
}
