use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Categories a product may be created with. Parsing ignores ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(ascii_case_insensitive)]
pub enum ProductCategory {
    /// Perishable goods, subject to the minimum shelf-life rule
    Fresh,
    /// Electrical goods, subject to the voltage/socket rule
    Electric,
}

impl ProductCategory {
    /// Canonical spelling for a known category, otherwise the input unchanged
    pub fn normalize(raw: &str) -> String {
        raw.parse::<ProductCategory>()
            .map(|c| c.to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}

/// Product document stored in the `Products` collection.
///
/// Field names on the wire and in storage keep the legacy spelling
/// (`isactive`, `ExpiryDate`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Product {
    /// Caller-assigned identifier, unique across products
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Integer price kept as text
    pub price: String,
    pub category: String,
    #[serde(rename = "isactive")]
    pub is_active: bool,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub voltage: String,
    pub socket: String,
}

/// Query parameters of `CreateNewProduct`
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateProduct {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Must parse as an integer
    #[serde(default)]
    #[validate(custom(function = "validate_price", message = "price is invalid"))]
    pub price: String,
    /// `Fresh` or `Electric`
    #[serde(rename = "catergory", alias = "category", default)]
    pub category: String,
    #[serde(rename = "isActive", alias = "isactive", default)]
    pub is_active: bool,
    /// RFC 3339, `YYYY-MM-DD` or `MM/DD/YYYY`
    #[serde(
        rename = "ExpiryDate",
        alias = "expiryDate",
        default,
        deserialize_with = "deserialize_expiry_date"
    )]
    #[param(value_type = Option<String>)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voltage: String,
    #[serde(default)]
    pub socket: String,
}

/// Query parameters of `UpdateProduct`. Every mutable field is overwritten.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateProduct {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "validate_price", message = "price is invalid"))]
    pub price: String,
    #[serde(alias = "catergory", default)]
    pub category: String,
    #[serde(rename = "isactive", alias = "isActive", default)]
    pub is_active: bool,
    #[serde(
        rename = "expiryDate",
        alias = "ExpiryDate",
        default,
        deserialize_with = "deserialize_expiry_date"
    )]
    #[param(value_type = Option<String>)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voltage: String,
    #[serde(default)]
    pub socket: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductIdQuery {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Inclusive upper bound, integer
    pub price: String,
}

impl Product {
    /// Build the stored document for a validated create request
    pub fn new(input: CreateProduct, category: ProductCategory) -> Self {
        Self {
            id: input.id,
            title: input.title,
            description: input.description,
            price: input.price.trim().to_string(),
            category: category.to_string(),
            is_active: input.is_active,
            expiry_date: input.expiry_date,
            voltage: input.voltage,
            socket: input.socket,
        }
    }

    /// Full replacement document for an update
    pub fn replacement(input: UpdateProduct) -> Self {
        Self {
            id: input.id,
            title: input.title,
            description: input.description,
            price: input.price.trim().to_string(),
            category: ProductCategory::normalize(&input.category),
            is_active: input.is_active,
            expiry_date: input.expiry_date,
            voltage: input.voltage,
            socket: input.socket,
        }
    }
}

/// Parse a price as a whole number, allowing surrounding whitespace
pub fn parse_price(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn validate_price(price: &str) -> Result<(), ValidationError> {
    match parse_price(price) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("price")),
    }
}

/// Parse an expiry date given as RFC 3339, `YYYY-MM-DD` or `MM/DD/YYYY`.
/// Date-only forms are taken as midnight UTC.
pub fn parse_expiry_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn deserialize_expiry_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_expiry_date(value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid expiry date: {}", value))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("fresh".parse::<ProductCategory>().unwrap(), ProductCategory::Fresh);
        assert_eq!("ELECTRIC".parse::<ProductCategory>().unwrap(), ProductCategory::Electric);
        assert!("Toys".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_category_normalize() {
        assert_eq!(ProductCategory::normalize("fReSh"), "Fresh");
        assert_eq!(ProductCategory::normalize("Garden"), "Garden");
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("120"), Some(120));
        assert_eq!(parse_price(" 45 "), Some(45));
        assert_eq!(parse_price("-3"), Some(-3));
        assert_eq!(parse_price("12.5"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_parse_expiry_date_formats() {
        let us = parse_expiry_date("12/31/2030").unwrap();
        assert_eq!((us.year(), us.month(), us.day()), (2030, 12, 31));

        let iso = parse_expiry_date("2030-01-15").unwrap();
        assert_eq!((iso.year(), iso.month(), iso.day(), iso.hour()), (2030, 1, 15, 0));

        let rfc = parse_expiry_date("2030-01-15T10:30:00+02:00").unwrap();
        assert_eq!(rfc.hour(), 8);

        assert!(parse_expiry_date("31/12/2030").is_none());
    }

    #[test]
    fn test_create_product_validation() {
        let mut input = CreateProduct {
            price: "10".into(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        input.price = "ten".into();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_product_serializes_legacy_field_names() {
        let product = Product {
            id: 7,
            is_active: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["isactive"], true);
        assert!(json.get("ExpiryDate").is_some());
        assert!(json.get("is_active").is_none());
    }

    #[test]
    fn test_replacement_normalizes_known_category() {
        let product = Product::replacement(UpdateProduct {
            id: 1,
            price: " 5 ".into(),
            category: "electric".into(),
            ..Default::default()
        });
        assert_eq!(product.category, "Electric");
        assert_eq!(product.price, "5");
    }
}
