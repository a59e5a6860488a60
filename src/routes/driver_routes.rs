use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::{CarController, DriverController};
use crate::dto::driver_dto::{
    CreateDriverRequest, DriverFilters, DriverResponse, LocationParams,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_driver))
        .route("/", get(list_drivers))
        .route("/:driver_id", get(get_driver))
        .route("/:driver_id", put(update_location))
        .route("/:driver_id", delete(delete_driver))
        .route("/:driver_id/car/:license_plate", put(select_car))
        .route("/:driver_id/car/:license_plate", delete(deselect_car))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<DriverResponse>), AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<i64>,
) -> Result<Json<DriverResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let driver = controller.find(driver_id).await?;
    Ok(Json(DriverResponse::from_driver(driver)))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(filters): Query<DriverFilters>,
) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

// Actualización de ubicación via query params longitude/latitude
async fn update_location(
    State(state): State<AppState>,
    Path(driver_id): Path<i64>,
    Query(params): Query<LocationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    controller
        .update_location(driver_id, params.longitude, params.latitude)
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Location updated"
    })))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    controller.delete(driver_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Driver deleted"
    })))
}

// La asignación se enruta bajo /drivers pero la ejecuta el flujo del
// controlador de coches, que es el dueño del enlace.
async fn select_car(
    State(state): State<AppState>,
    Path((driver_id, license_plate)): Path<(i64, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CarController::new(state.pool.clone());
    controller.assign_driver(driver_id, &license_plate).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Driver assigned to car"
    })))
}

async fn deselect_car(
    State(state): State<AppState>,
    Path((driver_id, license_plate)): Path<(i64, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CarController::new(state.pool.clone());
    controller.unassign_driver(driver_id, &license_plate).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Driver unassigned from car"
    })))
}
