//! Food recommendation and nutrition lookup types

use serde::{Deserialize, Serialize};

use crate::dataset::FoodRecord;

#[derive(Debug, Deserialize)]
pub struct FoodRecommendationRequest {
    /// Accepted as a number or a numeric string, 0-100
    #[serde(default)]
    pub diabetes_percentage: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct FoodRecommendationResponse {
    pub diabetes: bool,
    pub food_recommendation: Vec<Vec<MenuItem>>,
}

#[derive(Debug, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub calories: f64,
    pub carbohydrate: f64,
    pub fat: f64,
    pub proteins: f64,
    pub image: String,
}

impl From<&FoodRecord> for MenuItem {
    fn from(food: &FoodRecord) -> Self {
        Self {
            name: food.name.clone(),
            calories: food.calories,
            carbohydrate: food.carbohydrate,
            fat: food.fat,
            proteins: food.proteins,
            image: food.image.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NutritionRequest {
    pub name: Option<String>,
    /// Weight string such as "250g" or "1.2kg"; values are per 100 g
    /// when omitted
    #[serde(default)]
    pub volume: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NutritionInfo {
    pub proteins: String,
    pub calories: String,
    pub carbohydrates: String,
    pub fat: String,
    pub sugar: String,
}

#[derive(Debug, Serialize)]
pub struct NutritionResponse {
    pub food_name: String,
    pub nutrition_info: NutritionInfo,
    pub alert: &'static str,
    pub volume: String,
}
