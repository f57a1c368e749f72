//! Food recommendation and nutrition lookup handlers

use axum::{extract::State, Json};

use crate::dataset::catalog::{ITEMS_PER_MENU, MENUS_PER_RESPONSE};
use crate::dataset::units::parse_weight_grams;
use crate::models::{
    FoodRecommendationRequest, FoodRecommendationResponse, MenuItem, NutritionInfo,
    NutritionRequest, NutritionResponse,
};
use crate::{AppError, AppResult, AppState};

/// Risk ratio (percentage / 100) at which the diabetic menu is served
const DIABETIC_RATIO: f64 = 0.18;

const ALERT_NOT_FOUND: &str = "Food not found";
const ALERT_SUITABLE: &str = "Suitable for diabetes";
const ALERT_NOT_RECOMMENDED: &str = "Not recommended for diabetes";

pub async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<FoodRecommendationRequest>,
) -> AppResult<Json<FoodRecommendationResponse>> {
    let raw = req.diabetes_percentage.ok_or_else(|| {
        AppError::ValidationError("The 'diabetes_percentage' field must be provided".to_string())
    })?;
    let percentage = as_number(&raw).ok_or_else(|| {
        AppError::ValidationError("The 'diabetes_percentage' field must be a numeric value".to_string())
    })?;

    let diabetic = percentage / 100.0 >= DIABETIC_RATIO;

    let catalog = &state.catalog;
    let pool = if diabetic {
        catalog.diabetic_foods()
    } else {
        catalog.foods().iter().collect()
    };

    let food_recommendation = catalog
        .sample_menus(&pool, MENUS_PER_RESPONSE, ITEMS_PER_MENU)
        .into_iter()
        .map(|menu| menu.into_iter().map(MenuItem::from).collect())
        .collect();

    Ok(Json(FoodRecommendationResponse {
        diabetes: diabetic,
        food_recommendation,
    }))
}

pub async fn nutritions(
    State(state): State<AppState>,
    Json(req): Json<NutritionRequest>,
) -> AppResult<Json<NutritionResponse>> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::ValidationError("'food_name' must be provided.".to_string()))?;

    // Catalog values are per 100 g; a volume rescales them.
    let factor = match req.volume.as_deref() {
        Some(volume) => {
            let grams = parse_weight_grams(volume)
                .map_err(|e| AppError::ValidationError(e.to_string()))?;
            grams / 100.0
        }
        None => 1.0,
    };

    let (proteins, calories, carbohydrates, fat, sugar) = state
        .catalog
        .lookup(name)
        .map(|f| (f.proteins, f.calories, f.carbohydrate, f.fat, f.sugar))
        .unwrap_or_default();

    let proteins = proteins * factor;
    let calories = calories * factor;
    let carbohydrates = carbohydrates * factor;
    let fat = fat * factor;
    let sugar = sugar * factor;

    let alert = if proteins == 0.0 && calories == 0.0 && carbohydrates == 0.0 && fat == 0.0 && sugar == 0.0 {
        ALERT_NOT_FOUND
    } else if state
        .catalog
        .limits()
        .strictly_within(calories, proteins, fat, carbohydrates)
    {
        ALERT_SUITABLE
    } else {
        ALERT_NOT_RECOMMENDED
    };

    Ok(Json(NutritionResponse {
        food_name: name.to_string(),
        nutrition_info: NutritionInfo {
            proteins: format!("{:.2} g", proteins),
            calories: format!("{:.2} kcal", calories),
            carbohydrates: format!("{:.2} g", carbohydrates),
            fat: format!("{:.2} g", fat),
            sugar: format!("{:.2} g", sugar),
        },
        alert,
        volume: req.volume.unwrap_or_else(|| "100 g".to_string()),
    }))
}

fn as_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
