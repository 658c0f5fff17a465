use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

/// Ordered, duplicate-free list of product ids.
///
/// Stored and exchanged as comma-joined text (`"1,2,3"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductIds(Vec<i64>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Product id '{0}' is not a valid integer")]
pub struct InvalidProductId(pub String);

impl ProductIds {
    /// Collect ids, keeping the first occurrence of each
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut unique = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self(unique)
    }

    /// Parse comma-separated text, dropping tokens that are not integers.
    /// Used for stored values, which are not re-validated on read.
    pub fn parse_lenient(raw: &str) -> Self {
        Self::new(tokens(raw).filter_map(|token| token.parse().ok()))
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Keep only ids present in `existing`, preserving order
    pub fn retain_existing(self, existing: &[i64]) -> Self {
        Self(self.0.into_iter().filter(|id| existing.contains(id)).collect())
    }
}

fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|token| !token.is_empty())
}

impl FromStr for ProductIds {
    type Err = InvalidProductId;

    /// Split on commas, trim, skip empty tokens, de-duplicate.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let ids = tokens(raw)
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| InvalidProductId(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(ids))
    }
}

impl fmt::Display for ProductIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

impl Serialize for ProductIds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProductIds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::parse_lenient(&s)).unwrap_or_default())
    }
}

/// Catalog document stored in the `Catalogs` collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Catalog {
    /// Caller-assigned identifier, unique across catalogs
    pub id: i64,
    pub title: String,
    /// Referenced product ids, comma-joined
    #[schema(value_type = String, example = "1,2,3")]
    pub products: ProductIds,
}

/// Query parameters of `CreateNewCatalog`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateCatalog {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Comma-separated product ids; unknown products are dropped
    #[serde(default)]
    pub products: String,
}

/// Query parameters of `UpdateCatalog`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateCatalog {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Comma-separated product ids, stored after de-duplication
    #[serde(rename = "productIds", alias = "products", default)]
    pub product_ids: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogIdQuery {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductIdQuery {
    #[serde(rename = "ProductId", alias = "productId")]
    pub product_id: i64,
}

impl domain_products::Summary for Catalog {
    fn summary_id(&self) -> i64 {
        self.id
    }

    fn summary_title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ProductIds {
        raw.parse().unwrap()
    }

    #[test]
    fn test_parse_dedups_in_order() {
        assert_eq!(parse("1,2,2,9").as_slice(), &[1, 2, 9]);
        assert_eq!(parse("3,1,3,1,2").as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn test_parse_trims_and_skips_empty_tokens() {
        assert_eq!(parse(" 4 , ,5,,").as_slice(), &[4, 5]);
        assert!(parse("").is_empty());
        assert!(parse(" , ").is_empty());
    }

    #[test]
    fn test_parse_rejects_non_integer_token() {
        let err = "1,abc,3".parse::<ProductIds>().unwrap_err();
        assert_eq!(err, InvalidProductId("abc".into()));
    }

    #[test]
    fn test_dedup_is_idempotent() {
        for raw in ["1,1,1", "5,4,5,3,4", "", "7", "2,10,2,10,11"] {
            let once = parse(raw);
            let twice = parse(&once.to_string());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_dedup_output_is_unique_subsequence_of_input() {
        let input = [8, 3, 8, 1, 3, 3, 9, 1];
        let ids = ProductIds::new(input);

        let mut seen = Vec::new();
        for id in ids.as_slice() {
            assert!(!seen.contains(id));
            seen.push(*id);
        }

        let mut cursor = input.iter();
        assert!(ids.as_slice().iter().all(|id| cursor.any(|x| x == id)));

        let mut distinct = input.to_vec();
        distinct.sort();
        distinct.dedup();
        assert_eq!(ids.len(), distinct.len());
    }

    #[test]
    fn test_display_joins_with_commas() {
        assert_eq!(ProductIds::new([1, 2, 3]).to_string(), "1,2,3");
        assert_eq!(ProductIds::default().to_string(), "");
    }

    #[test]
    fn test_retain_existing_keeps_input_order() {
        let ids = parse("9,2,1,2").retain_existing(&[1, 2, 3]);
        assert_eq!(ids.as_slice(), &[2, 1]);
    }

    #[test]
    fn test_catalog_serializes_products_as_text() {
        let catalog = Catalog {
            id: 1,
            title: "Summer".into(),
            products: ProductIds::new([4, 5]),
        };
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["products"], "4,5");

        let back: Catalog = serde_json::from_value(json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn test_stored_products_are_read_leniently() {
        let catalog: Catalog =
            serde_json::from_str(r#"{"id":2,"title":"Old","products":"1,x,1,3"}"#).unwrap();
        assert_eq!(catalog.products.as_slice(), &[1, 3]);
    }
}
