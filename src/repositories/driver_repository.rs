use sqlx::{PgConnection, PgPool};

use crate::models::{Driver, GeoCoordinate, OnlineStatus};
use crate::utils::errors::{map_store_error, AppError};

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un conductor nuevo
    ///
    /// Los valores por defecto del esquema dejan el registro OFFLINE, no
    /// borrado, sin coordenada y sin coche, sin importar lo que venga en
    /// la petición.
    pub async fn create(&self, username: String, password: String) -> Result<Driver, AppError> {
        sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO driver (username, password)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_store_error(e, "A driver with this username already exists"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn find_all(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM driver ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    pub async fn find_by_online_status(
        &self,
        online_status: OnlineStatus,
    ) -> Result<Vec<Driver>, AppError> {
        let drivers =
            sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE online_status = $1 ORDER BY id")
                .bind(online_status)
                .fetch_all(&self.pool)
                .await?;

        Ok(drivers)
    }

    /// Borrado lógico, el registro se conserva con deleted = true
    pub async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE driver SET deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sobrescribir la coordenada y refrescar su timestamp
    pub async fn update_location(
        &self,
        id: i64,
        coordinate: GeoCoordinate,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE driver
            SET latitude = $2, longitude = $3, date_coordinate_updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(coordinate.latitude())
        .bind(coordinate.longitude())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Buscar por id bloqueando la fila dentro de la transacción
    pub async fn find_by_id_locked(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(driver)
    }

    /// Escribir o limpiar la referencia al coche asignado
    pub async fn set_car(
        conn: &mut PgConnection,
        driver_id: i64,
        car_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE driver SET car_id = $2 WHERE id = $1")
            .bind(driver_id)
            .bind(car_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
