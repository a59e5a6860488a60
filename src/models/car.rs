use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tipo de motor del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "engine_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EngineType {
    Gas,
    Electric,
    Hybrid,
}

/// Fila de la tabla `car`
///
/// El id es interno y nunca se serializa hacia afuera. La relación con el
/// conductor se modela por id (`driver_id`) y solo la escribe el flujo de
/// asignación del controlador de coches.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Car {
    pub id: i64,
    pub date_created: DateTime<Utc>,
    pub license_plate: String,
    pub seat_count: i32,
    pub deleted: bool,
    pub convertible: bool,
    pub rating: i32,
    pub engine_type: EngineType,
    pub manufacturer: String,
    pub driver_id: Option<i64>,
}
