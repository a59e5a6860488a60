//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! antes de tocar el almacén.

use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.is_empty() || clean_plate.len() > 10 {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que la cantidad de asientos sea no negativa
pub fn validate_seat_count(value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        let mut error = ValidationError::new("seat_count");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("driver01").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("546PW").is_ok());
        assert!(validate_license_plate("AB-123-CD").is_ok());
        assert!(validate_license_plate("").is_err());
        assert!(validate_license_plate("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_validate_seat_count() {
        assert!(validate_seat_count(0).is_ok());
        assert!(validate_seat_count(4).is_ok());
        assert!(validate_seat_count(-1).is_err());
    }
}
