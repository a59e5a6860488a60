use serde::{Deserialize, Serialize};

use crate::dto::driver_dto::DriverResponse;
use crate::models::{Car, Driver, EngineType};

// Request para registrar un coche
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    pub license_plate: String,
    pub seat_count: i32,
    #[serde(default)]
    pub convertible: bool,
    #[serde(default)]
    pub rating: i32,
    pub engine_type: EngineType,
    pub manufacturer: String,
}

// Response de coche, sin id interno
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub license_plate: String,
    pub seat_count: i32,
    pub convertible: bool,
    pub rating: i32,
    pub engine_type: EngineType,
    pub manufacturer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<DriverResponse>,
}

impl CarResponse {
    pub fn from_car(car: Car, driver: Option<Driver>) -> Self {
        Self {
            license_plate: car.license_plate,
            seat_count: car.seat_count,
            convertible: car.convertible,
            rating: car.rating,
            engine_type: car.engine_type,
            manufacturer: car.manufacturer,
            driver: driver.map(DriverResponse::from_driver),
        }
    }
}
