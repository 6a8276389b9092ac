//! Catalog adapter.
//!
//! Catalog, category and deal endpoints all return loosely shaped JSON. Pages
//! run each record through [`product_from_record`] before handing it to the
//! cart, which is where ID normalization and price validation happen.

use std::str::FromStr;

use medmart_core::{Price, PriceError, ProductId};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use crate::cart::ProductSnapshot;
use crate::error::CatalogError;

/// Keys tried, in order, for the display name.
const NAME_KEYS: &[&str] = &["name", "title"];

/// Keys tried, in order, for a single image URL.
const IMAGE_KEYS: &[&str] = &["image", "thumbnail", "image_url"];

/// Keys a listing response may wrap its product array in.
const LISTING_KEYS: &[&str] = &["products", "data", "items", "results"];

/// Normalize one catalog record into a [`ProductSnapshot`].
///
/// The whole record is kept as the snapshot's `raw` passthrough.
///
/// # Errors
///
/// Returns [`CatalogError`] if the record is not an object, has no usable
/// `id`, or has a missing, non-numeric or negative `price`.
pub fn product_from_record(record: &Value) -> Result<ProductSnapshot, CatalogError> {
    let obj = record.as_object().ok_or(CatalogError::NotAnObject)?;

    let id = obj
        .get("id")
        .and_then(ProductId::from_json)
        .ok_or(CatalogError::MissingId)?;

    let price = match obj.get("price") {
        None | Some(Value::Null) => return Err(CatalogError::MissingPrice(id)),
        Some(value) => parse_price(value).map_err(|source| CatalogError::InvalidPrice {
            id: id.clone(),
            source,
        })?,
    };

    let name = first_string(record, NAME_KEYS).unwrap_or_default();
    let image = first_string(record, IMAGE_KEYS).or_else(|| {
        obj.get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.iter().find_map(image_url))
    });

    Ok(ProductSnapshot {
        id,
        name,
        price,
        image,
        raw: record.clone(),
    })
}

/// Normalize every usable record in a listing response.
///
/// Accepts a bare array or an object wrapping one under a common key.
/// Records that fail [`product_from_record`] are logged and skipped.
#[must_use]
pub fn products_from_listing(listing: &Value) -> Vec<ProductSnapshot> {
    let records = listing.as_array().or_else(|| {
        LISTING_KEYS
            .iter()
            .find_map(|key| listing.get(key).and_then(Value::as_array))
    });

    let Some(records) = records else {
        warn!("Catalog listing has no product array");
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| match product_from_record(record) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(error = %e, "Skipping catalog record");
                None
            }
        })
        .collect()
}

fn parse_price(value: &Value) -> Result<Price, PriceError> {
    match value {
        Value::Number(n) => {
            let amount = Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .map_err(|_| PriceError::NotANumber(n.to_string()))?;
            Price::new(amount)
        }
        Value::String(s) => s.parse(),
        other => Err(PriceError::NotANumber(other.to_string())),
    }
}

fn first_string(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// An `images` entry is either a URL or an object with a `url`/`src`.
fn image_url(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(_) => first_string(entry, &["url", "src"]),
        _ => None,
    }
}
