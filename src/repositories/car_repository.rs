use sqlx::{PgConnection, PgPool};

use crate::models::{Car, EngineType};
use crate::utils::errors::{map_store_error, AppError};

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        license_plate: String,
        seat_count: i32,
        convertible: bool,
        rating: i32,
        engine_type: EngineType,
        manufacturer: String,
    ) -> Result<Car, AppError> {
        sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO car (license_plate, seat_count, convertible, rating, engine_type, manufacturer)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(license_plate)
        .bind(seat_count)
        .bind(convertible)
        .bind(rating)
        .bind(engine_type)
        .bind(manufacturer)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_store_error(e, "A car with this license plate already exists"))
    }

    pub async fn find_by_license_plate(&self, license_plate: &str) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM car WHERE license_plate = $1")
            .bind(license_plate)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM car WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn find_all(&self) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM car ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(cars)
    }

    /// Borrado físico, el registro no se conserva
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM car WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Buscar por matrícula bloqueando la fila dentro de la transacción
    ///
    /// El `FOR UPDATE` serializa asignaciones concurrentes sobre el mismo
    /// coche: el chequeo de "ya tiene conductor" y la escritura posterior
    /// ocurren sin ventana de carrera.
    pub async fn find_by_license_plate_locked(
        conn: &mut PgConnection,
        license_plate: &str,
    ) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM car WHERE license_plate = $1 FOR UPDATE")
            .bind(license_plate)
            .fetch_optional(conn)
            .await?;

        Ok(car)
    }

    /// Escribir o limpiar la referencia al conductor asignado
    pub async fn set_driver(
        conn: &mut PgConnection,
        car_id: i64,
        driver_id: Option<i64>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE car SET driver_id = $2 WHERE id = $1")
            .bind(car_id)
            .bind(driver_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
