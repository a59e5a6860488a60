//! Capa de persistencia
//!
//! Repositorios sqlx sobre PostgreSQL. Las operaciones que participan en
//! el flujo de asignación tienen variantes con conexión explícita para
//! ejecutarse dentro de la transacción del controlador.

pub mod car_repository;
pub mod driver_repository;

pub use car_repository::CarRepository;
pub use driver_repository::DriverRepository;
