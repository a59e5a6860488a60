use serde::{Deserialize, Serialize};

use crate::models::{Driver, GeoCoordinate, OnlineStatus};

// Request para registrar un conductor
//
// La coordenada entrante se acepta por compatibilidad pero se ignora: un
// conductor nuevo siempre nace sin ubicación y OFFLINE.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub username: String,
    pub password: String,
    pub coordinate: Option<GeoCoordinate>,
}

// Response de conductor, sin id interno
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<GeoCoordinate>,
}

impl DriverResponse {
    pub fn from_driver(driver: Driver) -> Self {
        Self {
            coordinate: driver.coordinate(),
            username: driver.username,
            password: driver.password,
        }
    }
}

// Filtros opcionales de la colección GET /drivers
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverFilters {
    pub online_status: Option<OnlineStatus>,
    pub username: Option<String>,
    pub deleted: Option<bool>,
}

// Parámetros de query de la actualización de ubicación
#[derive(Debug, Deserialize)]
pub struct LocationParams {
    pub longitude: f64,
    pub latitude: f64,
}
