//! Valor de coordenada geográfica
//!
//! Tipo de valor inmutable validado en construcción. Los rangos válidos
//! son latitud [-90, 90] y longitud [-180, 180].

use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

const MIN_LATITUDE: f64 = -90.0;
const MAX_LATITUDE: f64 = 90.0;
const MIN_LONGITUDE: f64 = -180.0;
const MAX_LONGITUDE: f64 = 180.0;

/// Par (latitud, longitud) validado
///
/// La deserialización pasa por el mismo factory validante, no hay forma
/// de construir una coordenada fuera de rango.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = String;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        GeoCoordinate::new(raw.latitude, raw.longitude).map_err(|e| e.to_string())
    }
}

impl GeoCoordinate {
    /// Construir una coordenada validando los rangos
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AppError> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(AppError::ConstraintViolation(format!(
                "latitude {} is outside the range [{}, {}]",
                latitude, MIN_LATITUDE, MAX_LATITUDE
            )));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(AppError::ConstraintViolation(format!(
                "longitude {} is outside the range [{}, {}]",
                longitude, MIN_LONGITUDE, MAX_LONGITUDE
            )));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

// Los rangos validados excluyen NaN, la igualdad exacta es total
impl Eq for GeoCoordinate {}

impl std::hash::Hash for GeoCoordinate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
