//! Store Model

use serde::{Deserialize, Serialize};

/// One physical outlet, mirroring a row of the `stores` table.
///
/// `lat`/`lng` stay null until the geocoding back-fill resolves the
/// address. The eight `has_*` flags are stored as 0/1 integers and are
/// never null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub operating_hours: Option<String>,
    pub waze_link: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub has_birthday_party: i64,
    pub has_breakfast: i64,
    pub has_cashless: i64,
    pub has_dessert_center: i64,
    pub has_digital_kiosk: i64,
    pub has_mccafe: i64,
    pub has_wifi: i64,
    pub has_mcdelivery: i64,
}

/// Insert payload for a scraped outlet (`id` is assigned by the database).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreCreate {
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub operating_hours: Option<String>,
    pub waze_link: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub has_birthday_party: i64,
    pub has_breakfast: i64,
    pub has_cashless: i64,
    pub has_dessert_center: i64,
    pub has_digital_kiosk: i64,
    pub has_mccafe: i64,
    pub has_wifi: i64,
    pub has_mcdelivery: i64,
}
