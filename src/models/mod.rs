//! Modelos de dominio
//!
//! Entidades persistentes (Car, Driver) y tipos de valor (GeoCoordinate,
//! EngineType, OnlineStatus) del núcleo de despacho.

pub mod car;
pub mod coordinate;
pub mod driver;

pub use car::{Car, EngineType};
pub use coordinate::GeoCoordinate;
pub use driver::{Driver, OnlineStatus};
