//! Formas de entrada y salida de la API
//!
//! Los nombres de campos en el cable van en camelCase. El id interno de
//! las entidades nunca se serializa hacia afuera ni se acepta al crear.

pub mod car_dto;
pub mod driver_dto;
