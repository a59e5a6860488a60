//! Rutas HTTP
//!
//! Un router por recurso, construidos con estado compartido AppState.

pub mod car_routes;
pub mod driver_routes;
