use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::CarController;
use crate::dto::car_dto::{CarResponse, CreateCarRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_car))
        .route("/", get(list_cars))
        .route("/:license_plate", get(get_car))
        .route("/:license_plate", delete(delete_car))
}

async fn create_car(
    State(state): State<AppState>,
    Json(request): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_car(
    State(state): State<AppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<CarResponse>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.find(&license_plate).await?;
    Ok(Json(response))
}

async fn list_cars(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.find_all().await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CarController::new(state.pool.clone());
    controller.delete(&license_plate).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Car deleted"
    })))
}
