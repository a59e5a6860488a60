use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::dto::driver_dto::{CreateDriverRequest, DriverFilters, DriverResponse};
use crate::models::{Driver, GeoCoordinate, OnlineStatus};
use crate::repositories::DriverRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::validate_not_empty;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    /// Buscar un conductor por id
    ///
    /// Los conductores con borrado lógico siguen siendo encontrables.
    pub async fn find(&self, driver_id: i64) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found_error("driver", &driver_id.to_string()))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> Result<DriverResponse, AppError> {
        if validate_not_empty(&request.username).is_err() {
            return Err(validation_error("username", "Username can not be null!"));
        }
        if validate_not_empty(&request.password).is_err() {
            return Err(validation_error("password", "Password can not be null!"));
        }

        let driver = self
            .repository
            .create(request.username, request.password)
            .await?;

        info!("👤 Conductor registrado: {}", driver.username);
        Ok(DriverResponse::from_driver(driver))
    }

    /// Borrado lógico del conductor
    pub async fn delete(&self, driver_id: i64) -> Result<(), AppError> {
        let deleted = self.repository.soft_delete(driver_id).await?;
        if !deleted {
            return Err(not_found_error("driver", &driver_id.to_string()));
        }

        info!("🗑️ Conductor {} marcado como borrado", driver_id);
        Ok(())
    }

    /// Actualizar la ubicación reportada por el conductor
    ///
    /// El conductor se resuelve primero: un id inexistente responde
    /// NotFound aunque la coordenada también sea inválida.
    pub async fn update_location(
        &self,
        driver_id: i64,
        longitude: f64,
        latitude: f64,
    ) -> Result<(), AppError> {
        self.find(driver_id).await?;

        let coordinate = GeoCoordinate::new(latitude, longitude)?;
        self.repository.update_location(driver_id, coordinate).await?;

        Ok(())
    }

    /// Escribir o limpiar la referencia al coche asignado
    ///
    /// Solo lo invoca el flujo de asignación del controlador de coches,
    /// dentro de su transacción. No hay ruta HTTP que llegue aquí.
    pub async fn update_car(
        conn: &mut PgConnection,
        driver_id: i64,
        car_id: Option<i64>,
    ) -> Result<(), AppError> {
        let updated = DriverRepository::set_car(conn, driver_id, car_id).await?;
        if !updated {
            return Err(not_found_error("driver", &driver_id.to_string()));
        }

        Ok(())
    }

    pub async fn find_by_status(&self, status: OnlineStatus) -> Result<Vec<Driver>, AppError> {
        self.repository.find_by_online_status(status).await
    }

    pub async fn find_all(&self) -> Result<Vec<Driver>, AppError> {
        self.repository.find_all().await
    }

    /// Colección de conductores con filtros opcionales
    ///
    /// El filtro de estado usa la consulta indexada; username y flag de
    /// borrado se filtran en memoria sobre el resultado.
    pub async fn list(&self, filters: DriverFilters) -> Result<Vec<DriverResponse>, AppError> {
        let mut drivers = match filters.online_status {
            Some(status) => self.find_by_status(status).await?,
            None => self.find_all().await?,
        };

        if let Some(username) = &filters.username {
            drivers.retain(|driver| &driver.username == username);
        }
        if let Some(deleted) = filters.deleted {
            drivers.retain(|driver| driver.deleted == deleted);
        }

        Ok(drivers.into_iter().map(DriverResponse::from_driver).collect())
    }
}
