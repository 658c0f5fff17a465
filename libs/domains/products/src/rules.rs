//! Category-specific acceptance rules applied when a product is created.

use chrono::{DateTime, Utc};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ProductCategory};

/// Default minimum shelf life, in whole days, for `Fresh` products
pub const DEFAULT_FRESH_MIN_SHELF_LIFE_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductRules {
    /// A `Fresh` product must expire strictly more than this many days from now
    pub fresh_min_shelf_life_days: i64,
}

impl Default for ProductRules {
    fn default() -> Self {
        Self {
            fresh_min_shelf_life_days: DEFAULT_FRESH_MIN_SHELF_LIFE_DAYS,
        }
    }
}

impl ProductRules {
    pub fn new(fresh_min_shelf_life_days: i64) -> Self {
        Self {
            fresh_min_shelf_life_days,
        }
    }

    /// Check the rule attached to `category` against the request.
    pub fn check(
        &self,
        category: ProductCategory,
        input: &CreateProduct,
        now: DateTime<Utc>,
    ) -> ProductResult<()> {
        match category {
            ProductCategory::Fresh => {
                if self.expiry_date_is_valid(input.expiry_date, now) {
                    Ok(())
                } else {
                    Err(ProductError::validation(format!(
                        "Product id {} expiry date is not valid",
                        input.id
                    )))
                }
            }
            ProductCategory::Electric => {
                if voltage_matches_socket(&input.voltage, &input.socket) {
                    Ok(())
                } else {
                    Err(ProductError::validation(format!(
                        "Product id {} voltage does not match socket",
                        input.id
                    )))
                }
            }
        }
    }

    /// Whole days until expiry, truncated toward zero, must exceed the threshold.
    pub fn expiry_date_is_valid(&self, expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        expiry.is_some_and(|date| (date - now).num_days() > self.fresh_min_shelf_life_days)
    }
}

/// 220V needs a UK or EU socket, 110V a US socket. Case-insensitive.
pub fn voltage_matches_socket(voltage: &str, socket: &str) -> bool {
    let socket = socket.trim();
    match voltage.trim() {
        "220" => socket.eq_ignore_ascii_case("UK") || socket.eq_ignore_ascii_case("EU"),
        "110" => socket.eq_ignore_ascii_case("US"),
        _ => false,
    }
}
