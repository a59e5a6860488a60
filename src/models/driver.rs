use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoCoordinate;

/// Estado de conexión del conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "online_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OnlineStatus {
    Online,
    Offline,
}

/// Fila de la tabla `driver`
///
/// La coordenada se persiste como par de columnas nullable; `coordinate()`
/// la reconstruye como tipo de valor. `car_id` es el lado propietario del
/// enlace 1:1 con `car` y solo lo escribe el flujo de asignación.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Driver {
    pub id: i64,
    pub date_created: DateTime<Utc>,
    pub username: String,
    pub password: String,
    pub deleted: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date_coordinate_updated: Option<DateTime<Utc>>,
    pub online_status: OnlineStatus,
    pub car_id: Option<i64>,
}

impl Driver {
    /// Coordenada actual, si el conductor reportó ubicación alguna vez
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        match (self.latitude, self.longitude) {
            // Las columnas solo se escriben con valores ya validados
            (Some(lat), Some(lon)) => GeoCoordinate::new(lat, lon).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_row(latitude: Option<f64>, longitude: Option<f64>) -> Driver {
        Driver {
            id: 1,
            date_created: Utc::now(),
            username: "driver01".to_string(),
            password: "secret".to_string(),
            deleted: false,
            latitude,
            longitude,
            date_coordinate_updated: None,
            online_status: OnlineStatus::Offline,
            car_id: None,
        }
    }

    #[test]
    fn test_online_status_wire_format() {
        assert_eq!(
            serde_json::to_value(OnlineStatus::Online).unwrap(),
            serde_json::json!("ONLINE")
        );
        assert_eq!(
            serde_json::from_str::<OnlineStatus>("\"OFFLINE\"").unwrap(),
            OnlineStatus::Offline
        );
    }

    #[test]
    fn test_coordinate_requires_both_columns() {
        assert!(driver_row(None, None).coordinate().is_none());
        assert!(driver_row(Some(52.52), None).coordinate().is_none());

        let coordinate = driver_row(Some(52.52), Some(13.405)).coordinate().unwrap();
        assert_eq!(coordinate.latitude(), 52.52);
        assert_eq!(coordinate.longitude(), 13.405);
    }
}
