//! Input validation helpers
//!
//! Everything here runs before the first write of a request.

use shared::models::{PricePayload, StockUpdate, WeightPayload};

use super::money::{MAX_MEASURE, MAX_PRICE, round2};
use crate::services::error::{CatalogError, CatalogResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, attribute, attribute value
pub const MAX_NAME_LEN: usize = 200;

/// URLs / media paths
pub const MAX_URL_LEN: usize = 2048;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidPayload(format!(
            "{field} must not be empty"
        )));
    }
    if value.len() > max_len {
        return Err(CatalogError::InvalidPayload(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional-content string is within the length limit.
pub fn validate_optional_text(value: &str, field: &str, max_len: usize) -> CatalogResult<()> {
    if value.len() > max_len {
        return Err(CatalogError::InvalidPayload(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

// ── Facet payloads ──────────────────────────────────────────────────

fn checked_amount(value: f64, field: &str) -> CatalogResult<f64> {
    if !value.is_finite() {
        return Err(CatalogError::InvalidPrice(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(CatalogError::InvalidPrice(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_PRICE {
        return Err(CatalogError::InvalidPrice(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"
        )));
    }
    round2(value).ok_or_else(|| {
        CatalogError::InvalidPrice(format!("{field} cannot be represented, got {value}"))
    })
}

/// Validate a price payload and return it rounded to 2 decimals
pub fn validate_price(payload: &PricePayload) -> CatalogResult<PricePayload> {
    let price = checked_amount(payload.price, "price")?;
    let cost = payload
        .cost
        .map(|c| checked_amount(c, "cost"))
        .transpose()?;
    let sale_price = payload
        .sale_price
        .map(|s| checked_amount(s, "sale_price"))
        .transpose()?;

    if let Some(sale) = sale_price
        && sale > price
    {
        return Err(CatalogError::InvalidPrice(format!(
            "sale_price ({sale}) must not exceed price ({price})"
        )));
    }

    Ok(PricePayload {
        cost,
        price,
        sale_price,
    })
}

fn checked_measure(value: f64, field: &str) -> CatalogResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CatalogError::InvalidWeight(format!(
            "{field} must be a finite non-negative number, got {value}"
        )));
    }
    if value > MAX_MEASURE {
        return Err(CatalogError::InvalidWeight(format!(
            "{field} exceeds maximum allowed ({MAX_MEASURE}), got {value}"
        )));
    }
    round2(value).ok_or_else(|| {
        CatalogError::InvalidWeight(format!("{field} cannot be represented, got {value}"))
    })
}

/// Validate a weight payload and return it rounded to 2 decimals
pub fn validate_weight(payload: &WeightPayload) -> CatalogResult<WeightPayload> {
    let dimension = |v: Option<f64>, field: &str| v.map(|v| checked_measure(v, field)).transpose();
    Ok(WeightPayload {
        weight: checked_measure(payload.weight, "weight")?,
        length: dimension(payload.length, "length")?,
        width: dimension(payload.width, "width")?,
        height: dimension(payload.height, "height")?,
    })
}

// ── Stock ───────────────────────────────────────────────────────────

/// Validate a stock update against the row's current values
pub fn validate_stock_update(
    current_quantity: i64,
    current_reserved: i64,
    update: &StockUpdate,
) -> CatalogResult<()> {
    let quantity = update.quantity.unwrap_or(current_quantity);
    let reserved = update.reserved_quantity.unwrap_or(current_reserved);

    if quantity < 0 {
        return Err(CatalogError::InvalidStock(format!(
            "quantity must be non-negative, got {quantity}"
        )));
    }
    if reserved < 0 || reserved > quantity {
        return Err(CatalogError::InvalidStock(format!(
            "reserved_quantity must be between 0 and quantity ({quantity}), got {reserved}"
        )));
    }
    if let Some(threshold) = update.low_stock_threshold
        && threshold < 0
    {
        return Err(CatalogError::InvalidStock(format!(
            "low_stock_threshold must be non-negative, got {threshold}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(price: f64, sale_price: Option<f64>) -> PricePayload {
        PricePayload {
            cost: None,
            price,
            sale_price,
        }
    }

    #[test]
    fn test_price_rounding() {
        let p = validate_price(&price(19.999, Some(15.125))).unwrap();
        assert_eq!(p.price, 20.0);
        assert_eq!(p.sale_price, Some(15.13));
    }

    #[test]
    fn test_sale_above_price_rejected() {
        assert!(matches!(
            validate_price(&price(10.0, Some(10.01))),
            Err(CatalogError::InvalidPrice(_))
        ));
        assert!(validate_price(&price(10.0, Some(10.0))).is_ok());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price(&price(-1.0, None)).is_err());
        assert!(validate_price(&price(f64::NAN, None)).is_err());
        assert!(validate_price(&price(MAX_PRICE + 1.0, None)).is_err());
        assert!(validate_price(&price(0.0, None)).is_ok());
        let with_bad_cost = PricePayload {
            cost: Some(f64::INFINITY),
            price: 1.0,
            sale_price: None,
        };
        assert!(validate_price(&with_bad_cost).is_err());
    }

    #[test]
    fn test_weight_validation() {
        let ok = validate_weight(&WeightPayload {
            weight: 1.234,
            length: Some(10.0),
            width: None,
            height: None,
        })
        .unwrap();
        assert_eq!(ok.weight, 1.23);

        let bad = WeightPayload {
            weight: 1.0,
            length: None,
            width: Some(-2.0),
            height: None,
        };
        assert!(matches!(
            validate_weight(&bad),
            Err(CatalogError::InvalidWeight(_))
        ));
    }

    #[test]
    fn test_huge_measures_rejected_not_zeroed() {
        let huge = WeightPayload {
            weight: 1e30,
            length: Some(1e29),
            width: None,
            height: None,
        };
        assert!(matches!(
            validate_weight(&huge),
            Err(CatalogError::InvalidWeight(_))
        ));

        let long = WeightPayload {
            weight: 1.0,
            length: Some(MAX_MEASURE + 0.5),
            width: None,
            height: None,
        };
        assert!(matches!(
            validate_weight(&long),
            Err(CatalogError::InvalidWeight(_))
        ));

        let at_limit = WeightPayload {
            weight: MAX_MEASURE,
            length: None,
            width: None,
            height: None,
        };
        assert_eq!(validate_weight(&at_limit).unwrap().weight, MAX_MEASURE);
    }

    #[test]
    fn test_stock_update_rules() {
        let update = StockUpdate {
            quantity: Some(5),
            reserved_quantity: Some(6),
            low_stock_threshold: None,
        };
        assert!(validate_stock_update(0, 0, &update).is_err());

        // lowering quantity below the existing reservation
        let update = StockUpdate {
            quantity: Some(2),
            ..Default::default()
        };
        assert!(validate_stock_update(10, 3, &update).is_err());

        let update = StockUpdate {
            quantity: Some(10),
            reserved_quantity: Some(10),
            low_stock_threshold: Some(2),
        };
        assert!(validate_stock_update(0, 0, &update).is_ok());
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("  ", "name_en", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Color", "name_en", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&"x".repeat(300), "name_ar", MAX_NAME_LEN).is_err());
    }
}
