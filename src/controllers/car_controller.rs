use sqlx::PgPool;
use tracing::{info, warn};

use crate::controllers::DriverController;
use crate::dto::car_dto::{CarResponse, CreateCarRequest};
use crate::models::{Car, Driver, OnlineStatus};
use crate::repositories::{CarRepository, DriverRepository};
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::{validate_license_plate, validate_seat_count};

pub struct CarController {
    repository: CarRepository,
    driver_repository: DriverRepository,
    pool: PgPool,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool.clone()),
            driver_repository: DriverRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn find(&self, license_plate: &str) -> Result<CarResponse, AppError> {
        let car = self.find_car_checked(license_plate).await?;
        let driver = self.assigned_driver(&car).await?;

        Ok(CarResponse::from_car(car, driver))
    }

    pub async fn create(&self, request: CreateCarRequest) -> Result<CarResponse, AppError> {
        if validate_license_plate(&request.license_plate).is_err() {
            return Err(validation_error("licensePlate", "License plate can not be null!"));
        }
        if validate_seat_count(request.seat_count).is_err() {
            return Err(validation_error("seatCount", "Seat count must not be negative"));
        }

        let car = self
            .repository
            .create(
                request.license_plate,
                request.seat_count,
                request.convertible,
                request.rating,
                request.engine_type,
                request.manufacturer,
            )
            .await?;

        info!("🚗 Coche registrado: {}", car.license_plate);
        Ok(CarResponse::from_car(car, None))
    }

    /// Borrado físico del coche
    pub async fn delete(&self, license_plate: &str) -> Result<(), AppError> {
        let car = self.find_car_checked(license_plate).await?;
        self.repository.delete(car.id).await?;

        info!("🗑️ Coche {} eliminado", license_plate);
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<CarResponse>, AppError> {
        let cars = self.repository.find_all().await?;

        let mut response = Vec::with_capacity(cars.len());
        for car in cars {
            let driver = self.assigned_driver(&car).await?;
            response.push(CarResponse::from_car(car, driver));
        }

        Ok(response)
    }

    /// Asignar un conductor a un coche
    ///
    /// Todo el flujo corre dentro de una transacción con las dos filas
    /// bloqueadas: o se escriben ambos lados del enlace o ninguno, y dos
    /// asignaciones concurrentes sobre el mismo coche se serializan.
    pub async fn assign_driver(&self, driver_id: i64, license_plate: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let car = CarRepository::find_by_license_plate_locked(&mut *tx, license_plate)
            .await?
            .ok_or_else(|| not_found_error("car", license_plate))?;
        let driver = DriverRepository::find_by_id_locked(&mut *tx, driver_id)
            .await?
            .ok_or_else(|| not_found_error("driver", &driver_id.to_string()))?;

        if car.driver_id.is_some() {
            warn!(
                "🚫 Coche {} ya está en uso por otro conductor",
                license_plate
            );
            return Err(AppError::CarAlreadyInUse(
                "This car is already in use by another driver".to_string(),
            ));
        }
        if driver.online_status != OnlineStatus::Online {
            return Err(AppError::ConstraintViolation(
                "Driver status is not ONLINE".to_string(),
            ));
        }

        CarRepository::set_driver(&mut *tx, car.id, Some(driver.id)).await?;
        DriverController::update_car(&mut *tx, driver.id, Some(car.id)).await?;

        tx.commit().await?;

        info!(
            "🔗 Conductor {} asignado al coche {}",
            driver_id, license_plate
        );
        Ok(())
    }

    /// Desasignar un conductor de un coche
    ///
    /// Flujo espejo de la asignación, también transaccional. Solo el
    /// conductor actualmente asignado puede soltar el coche.
    pub async fn unassign_driver(
        &self,
        driver_id: i64,
        license_plate: &str,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let car = CarRepository::find_by_license_plate_locked(&mut *tx, license_plate)
            .await?
            .ok_or_else(|| not_found_error("car", license_plate))?;
        let driver = DriverRepository::find_by_id_locked(&mut *tx, driver_id)
            .await?
            .ok_or_else(|| not_found_error("driver", &driver_id.to_string()))?;

        let assigned = match car.driver_id {
            Some(id) => id,
            None => {
                return Err(AppError::ConstraintViolation(
                    "No driver for this car".to_string(),
                ))
            }
        };
        if assigned != driver.id {
            return Err(AppError::ConstraintViolation(
                "This driver is not driving this car".to_string(),
            ));
        }

        CarRepository::set_driver(&mut *tx, car.id, None).await?;
        DriverController::update_car(&mut *tx, driver.id, None).await?;

        tx.commit().await?;

        info!(
            "🔓 Conductor {} desasignado del coche {}",
            driver_id, license_plate
        );
        Ok(())
    }

    async fn find_car_checked(&self, license_plate: &str) -> Result<Car, AppError> {
        self.repository
            .find_by_license_plate(license_plate)
            .await?
            .ok_or_else(|| not_found_error("car", license_plate))
    }

    async fn assigned_driver(&self, car: &Car) -> Result<Option<Driver>, AppError> {
        match car.driver_id {
            Some(driver_id) => self.driver_repository.find_by_id(driver_id).await,
            None => Ok(None),
        }
    }
}
