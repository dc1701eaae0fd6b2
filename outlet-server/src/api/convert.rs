//! Response Conversion
//!
//! 将门店记录转换为对外响应结构。转换是全函数: 缺失的可空字段降级为
//! "N/A" / null / false，所有键总是存在。

use serde::Serialize;
use shared::models::Store;

const NOT_AVAILABLE: &str = "N/A";

/// Formatted outlet returned by the public endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedStore {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub operating_hours: String,
    pub waze_link: String,
    pub contact: Contact,
    pub features: Features,
}

#[derive(Debug, Clone, Serialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub telephone: String,
    pub email: String,
}

/// Derived feature flags. `24_hours` comes from the operating-hours text;
/// the rest coerce the stored 0/1 columns.
#[derive(Debug, Clone, Serialize)]
pub struct Features {
    #[serde(rename = "24_hours")]
    pub twenty_four_hours: bool,
    pub birthday_party: bool,
    pub breakfast: bool,
    pub cashless: bool,
    pub dessert_center: bool,
    pub digital_kiosk: bool,
    pub mccafe: bool,
    pub wifi: bool,
    pub mcdelivery: bool,
}

/// Convert a raw store row into the response shape.
pub fn format_store(store: &Store) -> FormattedStore {
    FormattedStore {
        name: store.name.clone(),
        address: store.address.clone(),
        coordinates: Coordinates {
            latitude: store.lat,
            longitude: store.lng,
        },
        operating_hours: text_or_na(store.operating_hours.as_deref()),
        waze_link: text_or_na(store.waze_link.as_deref()),
        contact: Contact {
            telephone: text_or_na(store.telephone.as_deref()),
            email: text_or_na(store.email.as_deref()),
        },
        features: Features {
            twenty_four_hours: store
                .operating_hours
                .as_deref()
                .is_some_and(|hours| hours.contains("24 Hours")),
            birthday_party: store.has_birthday_party != 0,
            breakfast: store.has_breakfast != 0,
            cashless: store.has_cashless != 0,
            dessert_center: store.has_dessert_center != 0,
            digital_kiosk: store.has_digital_kiosk != 0,
            mccafe: store.has_mccafe != 0,
            wifi: store.has_wifi != 0,
            mcdelivery: store.has_mcdelivery != 0,
        },
    }
}

fn text_or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_store() -> Store {
        Store {
            id: 1,
            name: "McDonald's Bukit Bintang".to_string(),
            address: "Jalan Bukit Bintang, Kuala Lumpur".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn formatting_is_total_for_bare_records() {
        let formatted = format_store(&bare_store());

        assert_eq!(formatted.name, "McDonald's Bukit Bintang");
        assert_eq!(formatted.coordinates.latitude, None);
        assert_eq!(formatted.coordinates.longitude, None);
        assert_eq!(formatted.operating_hours, "N/A");
        assert_eq!(formatted.waze_link, "N/A");
        assert_eq!(formatted.contact.telephone, "N/A");
        assert_eq!(formatted.contact.email, "N/A");
        assert!(!formatted.features.twenty_four_hours);
        assert!(!formatted.features.wifi);
    }

    #[test]
    fn twenty_four_hours_derives_from_operating_hours_text() {
        let mut store = bare_store();
        store.operating_hours = Some("24 Hours".to_string());
        assert!(format_store(&store).features.twenty_four_hours);

        store.operating_hours = Some("8am - 11pm".to_string());
        assert!(!format_store(&store).features.twenty_four_hours);
    }

    #[test]
    fn stored_flags_coerce_to_booleans() {
        let mut store = bare_store();
        store.has_wifi = 1;
        store.has_mccafe = 1;
        let formatted = format_store(&store);
        assert!(formatted.features.wifi);
        assert!(formatted.features.mccafe);
        assert!(!formatted.features.cashless);
    }

    #[test]
    fn features_serialize_with_the_24_hours_key() {
        let value = serde_json::to_value(format_store(&bare_store())).expect("serializes");
        let features = &value["features"];
        assert!(features.get("24_hours").is_some());
        assert!(features.get("mcdelivery").is_some());
        assert_eq!(value["coordinates"]["latitude"], serde_json::Value::Null);
    }
}
