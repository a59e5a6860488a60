//! Lógica de negocio
//!
//! Un controlador por entidad. El flujo de asignación conductor↔coche
//! vive en el controlador de coches y es el único escritor de ambos
//! lados del enlace.

pub mod car_controller;
pub mod driver_controller;

pub use car_controller::CarController;
pub use driver_controller::DriverController;
