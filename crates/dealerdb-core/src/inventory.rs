//! Sample inventory file: car makes and models, dealers, and seed reviews.
//!
//! Loaded by `dealerdb-cli seed` and upserted by `dealerdb_db::seed_inventory`.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Earliest and latest model years accepted anywhere a car year appears.
pub const MIN_CAR_YEAR: i32 = 1886;
pub const MAX_CAR_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CarType {
    Sedan,
    Suv,
    Wagon,
    Coupe,
    Convertible,
    Hatchback,
}

impl std::fmt::Display for CarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CarType::Sedan => "SEDAN",
            CarType::Suv => "SUV",
            CarType::Wagon => "WAGON",
            CarType::Coupe => "COUPE",
            CarType::Convertible => "CONVERTIBLE",
            CarType::Hatchback => "HATCHBACK",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSeed {
    pub name: String,
    #[serde(rename = "type", default = "default_car_type")]
    pub car_type: CarType,
    pub year: i32,
}

fn default_car_type() -> CarType {
    CarType::Sedan
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeSeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub models: Vec<ModelSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerSeed {
    pub id: i64,
    pub city: String,
    pub state: String,
    pub st: String,
    pub address: String,
    pub zip: String,
    pub lat: f64,
    pub long: f64,
    pub short_name: String,
    pub full_name: String,
}

/// A sample review. Its sentiment is computed at seed time, not stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSeed {
    pub name: String,
    pub dealership: i64,
    pub review: String,
    #[serde(default)]
    pub purchase: bool,
    pub purchase_date: Option<NaiveDate>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryFile {
    #[serde(default)]
    pub makes: Vec<MakeSeed>,
    #[serde(default)]
    pub dealers: Vec<DealerSeed>,
    #[serde(default)]
    pub reviews: Vec<ReviewSeed>,
}

/// Load and validate the inventory file from YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_inventory(path: &Path) -> Result<InventoryFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InventoryFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_inventory(&content)
}

/// Parse and validate inventory YAML that is already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_inventory(content: &str) -> Result<InventoryFile, ConfigError> {
    let inventory: InventoryFile = serde_yaml::from_str(content)?;
    validate_inventory(&inventory)?;
    Ok(inventory)
}

fn validate_inventory(inventory: &InventoryFile) -> Result<(), ConfigError> {
    let mut seen_makes = HashSet::new();
    for make in &inventory.makes {
        if make.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "car make name must be non-empty".to_string(),
            ));
        }
        if !seen_makes.insert(make.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate car make: '{}'",
                make.name
            )));
        }

        let mut seen_models = HashSet::new();
        for model in &make.models {
            if model.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "model of '{}' has an empty name",
                    make.name
                )));
            }
            validate_year(&format!("{} {}", make.name, model.name), model.year)?;
            if !seen_models.insert((model.name.to_lowercase(), model.year)) {
                return Err(ConfigError::Validation(format!(
                    "duplicate model '{} {}' ({})",
                    make.name, model.name, model.year
                )));
            }
        }
    }

    let mut dealer_ids = HashSet::new();
    for dealer in &inventory.dealers {
        if dealer.id <= 0 {
            return Err(ConfigError::Validation(format!(
                "dealer '{}' has non-positive id {}",
                dealer.full_name, dealer.id
            )));
        }
        if !dealer_ids.insert(dealer.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate dealer id: {}",
                dealer.id
            )));
        }
        if dealer.st.len() != 2 || !dealer.st.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "dealer {} has invalid state abbreviation '{}'; expected two uppercase letters",
                dealer.id, dealer.st
            )));
        }
        if !(-90.0..=90.0).contains(&dealer.lat) || !(-180.0..=180.0).contains(&dealer.long) {
            return Err(ConfigError::Validation(format!(
                "dealer {} has out-of-range coordinates ({}, {})",
                dealer.id, dealer.lat, dealer.long
            )));
        }
    }

    for review in &inventory.reviews {
        if review.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "review author name must be non-empty".to_string(),
            ));
        }
        if !dealer_ids.contains(&review.dealership) {
            return Err(ConfigError::Validation(format!(
                "review by '{}' references unknown dealer {}",
                review.name, review.dealership
            )));
        }
        if let Some(year) = review.car_year {
            validate_year(&format!("review by '{}'", review.name), year)?;
        }
    }

    Ok(())
}

fn validate_year(context: &str, year: i32) -> Result<(), ConfigError> {
    if (MIN_CAR_YEAR..=MAX_CAR_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{context} has invalid year {year}; must be {MIN_CAR_YEAR}-{MAX_CAR_YEAR}"
        )))
    }
}
