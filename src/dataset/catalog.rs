//! Food catalog
//!
//! Two CSV files back the catalog: `nutrition.csv` with the general food
//! table (values per 100 g) and `diabet_food_recomendation_clean.csv`, a
//! reference table whose per-nutrient maxima define what still counts as
//! diabetes-suitable food.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::units::lenient_quantity_de;

const NUTRITION_FILE: &str = "nutrition.csv";
const REFERENCE_FILE: &str = "diabet_food_recomendation_clean.csv";

/// Menus returned per recommendation request
pub const MENUS_PER_RESPONSE: usize = 2;
/// Foods per menu
pub const ITEMS_PER_MENU: usize = 5;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("data file not found: {0}")]
    MissingFile(PathBuf),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("reference table {0} has no rows")]
    EmptyReference(PathBuf),
}

/// One food entry, nutrients per 100 g
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    #[serde(deserialize_with = "lenient_quantity_de", default)]
    pub calories: f64,
    #[serde(deserialize_with = "lenient_quantity_de", default)]
    pub proteins: f64,
    #[serde(deserialize_with = "lenient_quantity_de", default)]
    pub fat: f64,
    #[serde(deserialize_with = "lenient_quantity_de", default)]
    pub carbohydrate: f64,
    /// Optional column, 0 when the dataset does not track it
    #[serde(deserialize_with = "lenient_quantity_de", default)]
    pub sugar: f64,
    #[serde(default)]
    pub image: String,
}

/// Row of the diabetic reference table (capitalized headers upstream)
#[derive(Debug, Deserialize)]
struct ReferenceFood {
    #[serde(rename = "Calories", deserialize_with = "lenient_quantity_de", default)]
    calories: f64,
    #[serde(rename = "Protein", deserialize_with = "lenient_quantity_de", default)]
    protein: f64,
    #[serde(rename = "Fat", deserialize_with = "lenient_quantity_de", default)]
    fat: f64,
    #[serde(rename = "Carbohydrates", deserialize_with = "lenient_quantity_de", default)]
    carbohydrates: f64,
}

/// Per-nutrient maxima taken from the diabetic reference table
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NutrientLimits {
    pub max_calories: f64,
    pub max_protein: f64,
    pub max_fat: f64,
    pub max_carbs: f64,
}

impl NutrientLimits {
    /// Inclusive bound check, used when filtering the catalog
    pub fn contains(&self, food: &FoodRecord) -> bool {
        food.calories <= self.max_calories
            && food.carbohydrate <= self.max_carbs
            && food.fat <= self.max_fat
            && food.proteins <= self.max_protein
    }

    /// Strict bound check, used for the nutrition-info alert
    pub fn strictly_within(&self, calories: f64, protein: f64, fat: f64, carbs: f64) -> bool {
        carbs < self.max_carbs
            && calories < self.max_calories
            && protein < self.max_protein
            && fat < self.max_fat
    }
}

/// In-memory food catalog, loaded once at startup
#[derive(Debug)]
pub struct FoodCatalog {
    foods: Vec<FoodRecord>,
    limits: NutrientLimits,
}

impl FoodCatalog {
    /// Load both CSV files from `data_dir`
    pub fn load(data_dir: &Path) -> Result<Self, CatalogError> {
        let foods = read_rows::<FoodRecord>(&data_dir.join(NUTRITION_FILE))?;

        let reference_path = data_dir.join(REFERENCE_FILE);
        let reference = read_rows::<ReferenceFood>(&reference_path)?;
        if reference.is_empty() {
            return Err(CatalogError::EmptyReference(reference_path));
        }

        let limits = NutrientLimits {
            max_calories: column_max(&reference, |r| r.calories),
            max_protein: column_max(&reference, |r| r.protein),
            max_fat: column_max(&reference, |r| r.fat),
            max_carbs: column_max(&reference, |r| r.carbohydrates),
        };

        Ok(Self { foods, limits })
    }

    pub fn foods(&self) -> &[FoodRecord] {
        &self.foods
    }

    pub fn limits(&self) -> &NutrientLimits {
        &self.limits
    }

    /// Foods a diabetic patient can be offered
    pub fn diabetic_foods(&self) -> Vec<&FoodRecord> {
        self.foods.iter().filter(|f| self.limits.contains(f)).collect()
    }

    /// Random menus drawn from `pool`, each with up to `items` distinct foods
    pub fn sample_menus<'a>(
        &self,
        pool: &[&'a FoodRecord],
        menus: usize,
        items: usize,
    ) -> Vec<Vec<&'a FoodRecord>> {
        let mut rng = rand::thread_rng();
        (0..menus)
            .map(|_| {
                pool.choose_multiple(&mut rng, items.min(pool.len()))
                    .copied()
                    .collect()
            })
            .collect()
    }

    /// Case-insensitive lookup, exact name first then substring
    pub fn lookup(&self, name: &str) -> Option<&FoodRecord> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.foods
            .iter()
            .find(|f| f.name.to_lowercase() == needle)
            .or_else(|| {
                self.foods
                    .iter()
                    .find(|f| f.name.to_lowercase().contains(&needle))
            })
    }
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::MissingFile(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

fn column_max<T>(rows: &[T], field: impl Fn(&T) -> f64) -> f64 {
    rows.iter().map(field).fold(0.0, f64::max)
}
