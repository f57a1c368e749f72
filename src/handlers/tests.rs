use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tempfile::tempdir;

use super::{diabetes, exercise, food, scan};
use crate::config::Config;
use crate::dataset::FoodCatalog;
use crate::inference::PredictorSet;
use crate::models::*;
use crate::{AppError, AppState};

fn fixture_state(dir: &Path) -> AppState {
    let data_dir = dir.join("dataset");
    std::fs::create_dir_all(&data_dir).unwrap();

    let mut nutrition = File::create(data_dir.join("nutrition.csv")).unwrap();
    writeln!(nutrition, "id,calories,proteins,fat,carbohydrate,name,image").unwrap();
    writeln!(nutrition, "1,280,9.2,28.4,0,Abon,https://img/abon.jpg").unwrap();
    writeln!(nutrition, "2,51,1,0.3,11.3,Apel,https://img/apel.jpg").unwrap();
    writeln!(nutrition, "3,30,2,0,5,Bayam,https://img/bayam.jpg").unwrap();
    writeln!(nutrition, "4,45,0.9,0.2,10,Pepaya,https://img/pepaya.jpg").unwrap();

    let mut reference =
        File::create(data_dir.join("diabet_food_recomendation_clean.csv")).unwrap();
    writeln!(reference, "Name,Calories,Protein,Fat,Carbohydrates").unwrap();
    writeln!(reference, "Oatmeal,150,5,3,27").unwrap();

    // No model artifacts: every predictor runs in fallback mode
    AppState {
        config: Config::from_env(),
        catalog: Arc::new(FoodCatalog::load(&data_dir).unwrap()),
        predictors: Arc::new(PredictorSet::load(&dir.join("model"))),
    }
}

fn assert_validation(err: AppError, expected: &str) {
    match err {
        AppError::ValidationError(msg) => assert_eq!(msg, expected),
        other => panic!("expected ValidationError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_diabetes_predict_fallback_path() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = DiabetesRequest {
        gender: Some("Male".to_string()),
        age: Some(60.0),
        heart_disease: Some(1.0),
        smoking_history: Some("current".to_string()),
        bmi: Some(32.0),
    };

    let Json(resp) = diabetes::predict(State(state), Json(req)).await.unwrap();
    assert!((0.0..=100.0).contains(&resp.percentage));
    if resp.percentage > 18.0 {
        assert!(resp.note.contains("consult a doctor"));
    } else {
        assert!(resp.note.contains("may not be prone"));
    }
}

#[tokio::test]
async fn test_diabetes_predict_requires_all_fields() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = DiabetesRequest {
        gender: Some("female".to_string()),
        age: Some(40.0),
        heart_disease: None,
        smoking_history: Some("never".to_string()),
        bmi: Some(24.0),
    };

    let err = diabetes::predict(State(state), Json(req)).await.unwrap_err();
    assert_validation(err, super::MISSING_FIELDS);
}

#[tokio::test]
async fn test_diabetes_predict_rejects_out_of_range_age() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = DiabetesRequest {
        gender: Some("female".to_string()),
        age: Some(300.0),
        heart_disease: Some(0.0),
        smoking_history: Some("never".to_string()),
        bmi: Some(24.0),
    };

    let err = diabetes::predict(State(state), Json(req)).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_exercise_recommendation_fallback_path() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = ExerciseRequest {
        gender: Some("male".to_string()),
        age: Some(45.0),
        height: Some(172.0),
        diabetes: Some(1.0),
        bmi: Some(28.0),
    };

    let Json(resp) = exercise::recommend(State(state), Json(req)).await.unwrap();
    assert!(resp.calories_burned > 0.0);
    assert!(resp.exercise_duration > 0.0);
    assert!(!resp.exercise_categories.is_empty());
    // Two decimals max on the duration
    assert_eq!(
        resp.exercise_duration,
        (resp.exercise_duration * 100.0).round() / 100.0
    );
}

#[tokio::test]
async fn test_exercise_recommendation_requires_all_fields() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = ExerciseRequest {
        gender: None,
        age: Some(45.0),
        height: Some(172.0),
        diabetes: Some(0.0),
        bmi: Some(28.0),
    };

    let err = exercise::recommend(State(state), Json(req)).await.unwrap_err();
    assert_validation(err, super::MISSING_FIELDS);
}

#[tokio::test]
async fn test_food_recommendation_diabetic_menu_respects_limits() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());
    let limits = *state.catalog.limits();

    let req = FoodRecommendationRequest {
        diabetes_percentage: Some(serde_json::json!(90)),
    };

    let Json(resp) = food::recommend(State(state), Json(req)).await.unwrap();
    assert!(resp.diabetes);
    assert_eq!(resp.food_recommendation.len(), 2);
    for menu in &resp.food_recommendation {
        assert!(menu.len() <= 5);
        for item in menu {
            assert!(item.calories <= limits.max_calories);
            assert!(item.proteins <= limits.max_protein);
            assert!(item.fat <= limits.max_fat);
            assert!(item.carbohydrate <= limits.max_carbs);
        }
    }
}

#[tokio::test]
async fn test_food_recommendation_accepts_numeric_strings() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = FoodRecommendationRequest {
        diabetes_percentage: Some(serde_json::json!("12.5")),
    };

    let Json(resp) = food::recommend(State(state), Json(req)).await.unwrap();
    // 12.5% is under the diabetic cutoff
    assert!(!resp.diabetes);
}

#[tokio::test]
async fn test_food_recommendation_rejects_missing_and_non_numeric() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let err = food::recommend(
        State(state.clone()),
        Json(FoodRecommendationRequest { diabetes_percentage: None }),
    )
    .await
    .unwrap_err();
    assert_validation(err, "The 'diabetes_percentage' field must be provided");

    let err = food::recommend(
        State(state),
        Json(FoodRecommendationRequest {
            diabetes_percentage: Some(serde_json::json!("not a number")),
        }),
    )
    .await
    .unwrap_err();
    assert_validation(err, "The 'diabetes_percentage' field must be a numeric value");
}

#[tokio::test]
async fn test_food_nutritions_per_100g_defaults() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = NutritionRequest {
        name: Some("apel".to_string()),
        volume: None,
    };

    let Json(resp) = food::nutritions(State(state), Json(req)).await.unwrap();
    assert_eq!(resp.food_name, "apel");
    assert_eq!(resp.nutrition_info.calories, "51.00 kcal");
    assert_eq!(resp.nutrition_info.proteins, "1.00 g");
    assert_eq!(resp.volume, "100 g");
    assert_eq!(resp.alert, "Suitable for diabetes");
}

#[tokio::test]
async fn test_food_nutritions_scales_by_volume() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = NutritionRequest {
        name: Some("Apel".to_string()),
        volume: Some("200g".to_string()),
    };

    let Json(resp) = food::nutritions(State(state), Json(req)).await.unwrap();
    assert_eq!(resp.nutrition_info.calories, "102.00 kcal");
    assert_eq!(resp.nutrition_info.carbohydrates, "22.60 g");
    assert_eq!(resp.volume, "200g");
}

#[tokio::test]
async fn test_food_nutritions_flags_heavy_food() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = NutritionRequest {
        name: Some("Abon".to_string()),
        volume: None,
    };

    let Json(resp) = food::nutritions(State(state), Json(req)).await.unwrap();
    assert_eq!(resp.alert, "Not recommended for diabetes");
}

#[tokio::test]
async fn test_food_nutritions_unknown_food() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let req = NutritionRequest {
        name: Some("rendang".to_string()),
        volume: None,
    };

    let Json(resp) = food::nutritions(State(state), Json(req)).await.unwrap();
    assert_eq!(resp.alert, "Food not found");
    assert_eq!(resp.nutrition_info.calories, "0.00 kcal");
}

#[tokio::test]
async fn test_food_nutritions_validates_name_and_volume() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let err = food::nutritions(
        State(state.clone()),
        Json(NutritionRequest { name: Some("  ".to_string()), volume: None }),
    )
    .await
    .unwrap_err();
    assert_validation(err, "'food_name' must be provided.");

    let err = food::nutritions(
        State(state),
        Json(NutritionRequest {
            name: Some("Apel".to_string()),
            volume: Some("5 lbs".to_string()),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_scan_requires_image_url() {
    let dir = tempdir().unwrap();
    let state = fixture_state(dir.path());

    let err = scan::detect(State(state), Json(ScanRequest { image: None }))
        .await
        .unwrap_err();
    assert_validation(err, "The 'image' field must be provided");
}
