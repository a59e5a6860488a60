//! Tests de flujo contra PostgreSQL real
//!
//! Requieren DATABASE_URL apuntando a una base de pruebas; se ejecutan
//! con `cargo test -- --ignored`. Cada test usa nombres únicos para no
//! chocar con las restricciones de unicidad entre corridas. El test del
//! generador de matrículas es el único que corre sin base de datos.

use sqlx::PgPool;

use fleet_dispatch::controllers::{CarController, DriverController};
use fleet_dispatch::dto::car_dto::CreateCarRequest;
use fleet_dispatch::dto::driver_dto::DriverFilters;
use fleet_dispatch::models::{Driver, EngineType, OnlineStatus};
use fleet_dispatch::repositories::DriverRepository;
use fleet_dispatch::utils::errors::AppError;
use fleet_dispatch::utils::validation::validate_license_plate;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for workflow tests");
    let pool = PgPool::connect(&url).await.expect("connect");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
    pool
}

fn unique(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        chrono::Utc::now().timestamp_nanos_opt().unwrap()
    )
}

// Matrícula corta y única: prefijo + nanos en base 36. La matrícula
// admite como máximo 10 caracteres, así que el sufijo ocupa 5 y los
// prefijos de los tests no pasan de 5.
fn unique_plate(prefix: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap() as u64;
    let suffix: String = (0..5)
        .map(|_| {
            let digit = ALPHABET[(nanos % 36) as usize] as char;
            nanos /= 36;
            digit
        })
        .collect();
    format!("{}{}", prefix, suffix)
}

async fn create_driver(pool: &PgPool, prefix: &str) -> Driver {
    DriverRepository::new(pool.clone())
        .create(unique(prefix), "secret".to_string())
        .await
        .expect("create driver")
}

async fn create_car(pool: &PgPool, prefix: &str) -> String {
    let license_plate = unique_plate(prefix);
    CarController::new(pool.clone())
        .create(CreateCarRequest {
            license_plate: license_plate.clone(),
            seat_count: 4,
            convertible: false,
            rating: 10,
            engine_type: EngineType::Gas,
            manufacturer: "MERCEDES".to_string(),
        })
        .await
        .expect("create car");
    license_plate
}

// Cambio de estado "externo", no hay endpoint que lo haga
async fn set_online(pool: &PgPool, driver_id: i64) {
    sqlx::query("UPDATE driver SET online_status = 'ONLINE' WHERE id = $1")
        .bind(driver_id)
        .execute(pool)
        .await
        .expect("set online");
}

async fn reload_driver(pool: &PgPool, driver_id: i64) -> Driver {
    DriverRepository::new(pool.clone())
        .find_by_id(driver_id)
        .await
        .expect("find driver")
        .expect("driver exists")
}

// No necesita base de datos: garantiza que toda matrícula generada
// pasa la validación previa al INSERT
#[test]
fn test_generated_plates_pass_plate_validation() {
    for prefix in ["546PW", "CAR", "GHOST", "EMPTY", "HARD"] {
        let plate = unique_plate(prefix);
        assert!(
            validate_license_plate(&plate).is_ok(),
            "matrícula rechazada: {}",
            plate
        );
    }
}

#[tokio::test]
#[ignore]
async fn test_new_driver_defaults() {
    let pool = test_pool().await;
    let driver = create_driver(&pool, "defaults").await;

    assert_eq!(driver.online_status, OnlineStatus::Offline);
    assert!(!driver.deleted);
    assert!(driver.coordinate().is_none());
    assert!(driver.date_coordinate_updated.is_none());
    assert!(driver.car_id.is_none());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_username_is_constraint_violation() {
    let pool = test_pool().await;
    let driver = create_driver(&pool, "dup").await;

    let result = DriverRepository::new(pool.clone())
        .create(driver.username.clone(), "other".to_string())
        .await;

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
}

#[tokio::test]
#[ignore]
async fn test_created_car_is_findable_with_exact_fields() {
    let pool = test_pool().await;
    let license_plate = create_car(&pool, "546PW").await;

    let car = CarController::new(pool.clone())
        .find(&license_plate)
        .await
        .expect("find car");

    assert_eq!(car.license_plate, license_plate);
    assert_eq!(car.seat_count, 4);
    assert!(!car.convertible);
    assert_eq!(car.rating, 10);
    assert_eq!(car.engine_type, EngineType::Gas);
    assert_eq!(car.manufacturer, "MERCEDES");
    assert!(car.driver.is_none());
}

#[tokio::test]
#[ignore]
async fn test_assign_driver_links_both_sides() {
    let pool = test_pool().await;
    let car_controller = CarController::new(pool.clone());
    let driver = create_driver(&pool, "assign").await;
    let license_plate = create_car(&pool, "CAR").await;
    set_online(&pool, driver.id).await;

    car_controller
        .assign_driver(driver.id, &license_plate)
        .await
        .expect("assign");

    let car = car_controller.find(&license_plate).await.expect("find car");
    assert_eq!(
        car.driver.as_ref().map(|d| d.username.as_str()),
        Some(driver.username.as_str())
    );

    let reloaded = reload_driver(&pool, driver.id).await;
    assert!(reloaded.car_id.is_some());
}

#[tokio::test]
#[ignore]
async fn test_assign_fails_when_car_already_in_use() {
    let pool = test_pool().await;
    let car_controller = CarController::new(pool.clone());
    let first = create_driver(&pool, "first").await;
    let second = create_driver(&pool, "second").await;
    let license_plate = create_car(&pool, "BUSY").await;
    set_online(&pool, first.id).await;
    set_online(&pool, second.id).await;

    car_controller
        .assign_driver(first.id, &license_plate)
        .await
        .expect("first assign");

    let result = car_controller.assign_driver(second.id, &license_plate).await;
    assert!(matches!(result, Err(AppError::CarAlreadyInUse(_))));

    // Ningún registro cambió
    let car = car_controller.find(&license_plate).await.expect("find car");
    assert_eq!(
        car.driver.as_ref().map(|d| d.username.as_str()),
        Some(first.username.as_str())
    );
    assert!(reload_driver(&pool, second.id).await.car_id.is_none());
}

#[tokio::test]
#[ignore]
async fn test_assign_fails_when_driver_is_offline() {
    let pool = test_pool().await;
    let car_controller = CarController::new(pool.clone());
    let driver = create_driver(&pool, "offline").await;
    let license_plate = create_car(&pool, "OFFL").await;

    let result = car_controller.assign_driver(driver.id, &license_plate).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    let car = car_controller.find(&license_plate).await.expect("find car");
    assert!(car.driver.is_none());
    assert!(reload_driver(&pool, driver.id).await.car_id.is_none());
}

#[tokio::test]
#[ignore]
async fn test_assign_fails_for_missing_entities() {
    let pool = test_pool().await;
    let car_controller = CarController::new(pool.clone());
    let driver = create_driver(&pool, "lonely").await;

    let result = car_controller.assign_driver(driver.id, "NO-SUCH-PLATE").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let license_plate = create_car(&pool, "GHOST").await;
    let result = car_controller.assign_driver(-1, &license_plate).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_unassign_clears_both_sides() {
    let pool = test_pool().await;
    let car_controller = CarController::new(pool.clone());
    let driver = create_driver(&pool, "release").await;
    let license_plate = create_car(&pool, "FREE").await;
    set_online(&pool, driver.id).await;

    car_controller
        .assign_driver(driver.id, &license_plate)
        .await
        .expect("assign");
    car_controller
        .unassign_driver(driver.id, &license_plate)
        .await
        .expect("unassign");

    let car = car_controller.find(&license_plate).await.expect("find car");
    assert!(car.driver.is_none());
    assert!(reload_driver(&pool, driver.id).await.car_id.is_none());
}

#[tokio::test]
#[ignore]
async fn test_unassign_fails_for_wrong_driver() {
    let pool = test_pool().await;
    let car_controller = CarController::new(pool.clone());
    let owner = create_driver(&pool, "owner").await;
    let intruder = create_driver(&pool, "intruder").await;
    let license_plate = create_car(&pool, "MINE").await;
    set_online(&pool, owner.id).await;

    car_controller
        .assign_driver(owner.id, &license_plate)
        .await
        .expect("assign");

    let result = car_controller.unassign_driver(intruder.id, &license_plate).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    // El enlace sigue intacto
    let car = car_controller.find(&license_plate).await.expect("find car");
    assert_eq!(
        car.driver.as_ref().map(|d| d.username.as_str()),
        Some(owner.username.as_str())
    );
}

#[tokio::test]
#[ignore]
async fn test_unassign_fails_when_car_has_no_driver() {
    let pool = test_pool().await;
    let car_controller = CarController::new(pool.clone());
    let driver = create_driver(&pool, "nobody").await;
    let license_plate = create_car(&pool, "EMPTY").await;

    let result = car_controller.unassign_driver(driver.id, &license_plate).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
}

#[tokio::test]
#[ignore]
async fn test_update_location_sets_coordinate_and_timestamp() {
    let pool = test_pool().await;
    let controller = DriverController::new(pool.clone());
    let driver = create_driver(&pool, "moving").await;

    controller
        .update_location(driver.id, 13.405, 52.52)
        .await
        .expect("update location");

    let reloaded = reload_driver(&pool, driver.id).await;
    let coordinate = reloaded.coordinate().expect("coordinate set");
    assert_eq!(coordinate.latitude(), 52.52);
    assert_eq!(coordinate.longitude(), 13.405);
    assert!(reloaded.date_coordinate_updated.is_some());
}

#[tokio::test]
#[ignore]
async fn test_update_location_fails_for_missing_driver() {
    let pool = test_pool().await;
    let controller = DriverController::new(pool.clone());

    let result = controller.update_location(-1, 13.405, 52.52).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_update_location_rejects_invalid_coordinate() {
    let pool = test_pool().await;
    let controller = DriverController::new(pool.clone());
    let driver = create_driver(&pool, "lost").await;

    let result = controller.update_location(driver.id, 200.0, 52.52).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    assert!(reload_driver(&pool, driver.id).await.coordinate().is_none());
}

#[tokio::test]
#[ignore]
async fn test_deleted_driver_remains_findable() {
    let pool = test_pool().await;
    let controller = DriverController::new(pool.clone());
    let driver = create_driver(&pool, "gone").await;

    controller.delete(driver.id).await.expect("delete");

    // Borrado lógico: el registro sigue ahí y sigue siendo encontrable
    let found = controller.find(driver.id).await.expect("still findable");
    assert!(found.deleted);
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_driver_is_not_found() {
    let pool = test_pool().await;
    let controller = DriverController::new(pool.clone());

    let result = controller.delete(-1).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_status_filter_follows_external_flip() {
    let pool = test_pool().await;
    let controller = DriverController::new(pool.clone());
    let driver = create_driver(&pool, "flip").await;

    let online = controller
        .list(DriverFilters {
            online_status: Some(OnlineStatus::Online),
            username: Some(driver.username.clone()),
            deleted: None,
        })
        .await
        .expect("list");
    assert!(online.is_empty());

    set_online(&pool, driver.id).await;

    let online = controller
        .list(DriverFilters {
            online_status: Some(OnlineStatus::Online),
            username: Some(driver.username.clone()),
            deleted: None,
        })
        .await
        .expect("list");
    assert_eq!(online.len(), 1);
    assert_eq!(online[0].username, driver.username);
}

#[tokio::test]
#[ignore]
async fn test_deleted_filter_splits_soft_deleted_drivers() {
    let pool = test_pool().await;
    let controller = DriverController::new(pool.clone());
    let driver = create_driver(&pool, "filtered").await;

    controller.delete(driver.id).await.expect("delete");

    let active = controller
        .list(DriverFilters {
            online_status: None,
            username: Some(driver.username.clone()),
            deleted: Some(false),
        })
        .await
        .expect("list");
    assert!(active.is_empty());

    let removed = controller
        .list(DriverFilters {
            online_status: None,
            username: Some(driver.username.clone()),
            deleted: Some(true),
        })
        .await
        .expect("list");
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].username, driver.username);
}

#[tokio::test]
#[ignore]
async fn test_delete_car_is_hard_delete() {
    let pool = test_pool().await;
    let car_controller = CarController::new(pool.clone());
    let license_plate = create_car(&pool, "HARD").await;

    car_controller.delete(&license_plate).await.expect("delete");

    let result = car_controller.find(&license_plate).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
