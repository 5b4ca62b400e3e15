//! Market price tables
//!
//! Prices come from the catalog's baseline figures and can be replaced or
//! extended from a `crop,price` CSV export. The market advisor scores a crop
//! by its price relative to the most valuable crop in the table.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::CropCatalog;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct PriceRow {
    crop: String,
    price: String,
}

/// Crop name (lowercased) -> price per tonne
#[derive(Debug, Clone, Default)]
pub struct MarketPrices {
    prices: HashMap<String, f64>,
}

impl MarketPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline prices from the catalog
    pub fn from_catalog(catalog: &CropCatalog) -> Self {
        let mut prices = Self::new();
        for crop in catalog.crops() {
            if let Some(price) = crop.price {
                prices.insert(&crop.name, price);
            }
        }
        prices
    }

    /// Read a `crop,price` CSV. Rows that fail to parse are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut prices = Self::new();
        for (line, row) in rdr.deserialize::<PriceRow>().enumerate() {
            let row = match row {
                Ok(r) => r,
                Err(e) => {
                    warn!("Skipping malformed price row {}: {}", line + 2, e);
                    continue;
                }
            };
            match row.price.parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 && !row.crop.is_empty() => {
                    prices.insert(&row.crop, p);
                }
                _ => warn!(
                    "Skipping price row {} ({}): '{}' is not a valid price",
                    line + 2,
                    row.crop,
                    row.price
                ),
            }
        }
        debug!("Loaded {} market prices from CSV", prices.len());
        Ok(prices)
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn insert(&mut self, crop: &str, price: f64) {
        self.prices.insert(key(crop), price);
    }

    /// Overlay another table; its prices win
    pub fn merge(&mut self, other: MarketPrices) {
        self.prices.extend(other.prices);
    }

    pub fn price(&self, crop: &str) -> Option<f64> {
        self.prices.get(&key(crop)).copied()
    }

    pub fn max_price(&self) -> Option<f64> {
        self.prices.values().copied().reduce(f64::max)
    }

    /// Price relative to the most valuable crop, in [0,1]
    pub fn normalized(&self, crop: &str) -> Option<f64> {
        let price = self.price(crop)?;
        let max = self.max_price()?;
        if max <= 0.0 {
            return None;
        }
        Some((price / max).clamp(0.0, 1.0))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

fn key(crop: &str) -> String {
    crop.trim().to_lowercase()
}
