//! Store-Finder Ingestion
//!
//! 从官网 storefinder 接口抓取吉隆坡门店并入库，(name, address) 重复的
//! 记录跳过不覆盖。

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::repository::store;
use crate::utils::AppError;
use shared::models::StoreCreate;

/// Sentinel used when a store has no usable coordinates for a Waze link.
pub const WAZE_UNAVAILABLE: &str = "Location not available";

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub fetched: usize,
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct StoreFinderResponse {
    #[serde(default)]
    stores: Vec<RawStore>,
}

/// Raw entry as the store-finder endpoint returns it. Coordinates arrive
/// as strings; feature flags arrive as category names.
#[derive(Debug, Default, Deserialize)]
struct RawStore {
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    lat: String,
    #[serde(default)]
    lng: String,
    #[serde(default)]
    telephone: String,
    #[serde(default)]
    email: String,
    #[serde(default, rename = "cat")]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(default)]
    cat_name: String,
}

/// Store-finder scrape client.
#[derive(Clone)]
pub struct StoreFinderService {
    url: String,
    client: reqwest::Client,
}

impl StoreFinderService {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch every Kuala Lumpur outlet and insert the ones not seen before.
    pub async fn sync(&self, pool: &SqlitePool) -> Result<SyncReport, AppError> {
        let raw = self.fetch().await?;
        let mut report = SyncReport {
            fetched: raw.len(),
            ..Default::default()
        };

        for entry in raw {
            let record = to_store_create(entry);
            let inserted = store::insert_skip_duplicates(pool, &record).await?;
            if inserted {
                tracing::info!(name = %record.name, address = %record.address, "Stored outlet");
                report.inserted += 1;
            } else {
                tracing::debug!(name = %record.name, "Skipped duplicate outlet");
                report.skipped += 1;
            }
        }

        tracing::info!(
            fetched = report.fetched,
            inserted = report.inserted,
            skipped = report.skipped,
            "Store sync finished"
        );
        Ok(report)
    }

    async fn fetch(&self) -> Result<Vec<RawStore>, AppError> {
        let params = [
            ("ajax", "1"),
            ("action", "get_nearby_stores"),
            ("distance", "10000"),
            ("lat", ""),
            ("lng", ""),
            ("state", "Kuala Lumpur"),
            ("products", ""),
            ("address", "Kuala Lumpur, Malaysia"),
            ("issuggestion", "0"),
            ("islocateus", "0"),
        ];

        let resp = self
            .client
            .post(&self.url)
            .header("Referer", "https://www.mcdonalds.com.my/locate-us")
            .header("Origin", "https://www.mcdonalds.com.my")
            .header(
                "User-Agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Store finder request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Store finder returned status {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| AppError::upstream(format!("Failed to read store finder body: {e}")))?;

        parse_store_payload(&body)
    }
}

/// Parse the store-finder JSON document. The endpoint sometimes prefixes
/// the body with a UTF-8 BOM.
fn parse_store_payload(body: &str) -> Result<Vec<RawStore>, AppError> {
    let body = body.trim_start_matches('\u{feff}');
    let parsed: StoreFinderResponse = serde_json::from_str(body)
        .map_err(|e| AppError::upstream(format!("Invalid store finder payload: {e}")))?;
    Ok(parsed.stores)
}

/// Map a raw store-finder entry onto an insert payload.
fn to_store_create(raw: RawStore) -> StoreCreate {
    let lat = parse_coordinate(&raw.lat);
    let lng = parse_coordinate(&raw.lng);

    let mut record = StoreCreate {
        name: raw.name,
        address: raw.address,
        lat,
        lng,
        waze_link: Some(waze_link(lat, lng)),
        telephone: non_empty(raw.telephone),
        email: non_empty(raw.email),
        ..Default::default()
    };

    for category in &raw.categories {
        match category.cat_name.as_str() {
            "24 Hours" => record.operating_hours = Some("24 Hours".to_string()),
            "Birthday Party" => record.has_birthday_party = 1,
            "Breakfast" => record.has_breakfast = 1,
            "Cashless Facility" => record.has_cashless = 1,
            "Dessert Center" => record.has_dessert_center = 1,
            "Digital Order Kiosk" => record.has_digital_kiosk = 1,
            "McCafe" => record.has_mccafe = 1,
            "WiFi" => record.has_wifi = 1,
            "McDelivery" => record.has_mcdelivery = 1,
            _ => {}
        }
    }

    record
}

/// Waze deep link, or the sentinel when either coordinate is missing.
fn waze_link(lat: Option<f64>, lng: Option<f64>) -> String {
    match (lat, lng) {
        (Some(lat), Some(lng)) => format!("https://waze.com/ul?ll={lat},{lng}"),
        _ => WAZE_UNAVAILABLE.to_string(),
    }
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(categories: &[&str]) -> RawStore {
        RawStore {
            name: "McDonald's Bukit Bintang".to_string(),
            address: "Jalan Bukit Bintang, Kuala Lumpur".to_string(),
            lat: "3.1466".to_string(),
            lng: "101.7110".to_string(),
            telephone: "03-2110 1234".to_string(),
            email: String::new(),
            categories: categories
                .iter()
                .map(|c| RawCategory {
                    cat_name: (*c).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn categories_map_to_feature_flags() {
        let record = to_store_create(raw(&["24 Hours", "McCafe", "WiFi", "Birthday Party"]));

        assert_eq!(record.operating_hours.as_deref(), Some("24 Hours"));
        assert_eq!(record.has_mccafe, 1);
        assert_eq!(record.has_wifi, 1);
        assert_eq!(record.has_birthday_party, 1);
        assert_eq!(record.has_breakfast, 0);
        assert_eq!(record.has_mcdelivery, 0);
    }

    #[test]
    fn unknown_categories_are_ignored() {
        let record = to_store_create(raw(&["Drive-Thru"]));
        assert_eq!(record.operating_hours, None);
        assert_eq!(record.has_birthday_party, 0);
    }

    #[test]
    fn waze_link_requires_both_coordinates() {
        assert_eq!(
            waze_link(Some(3.1466), Some(101.7110)),
            "https://waze.com/ul?ll=3.1466,101.711"
        );
        assert_eq!(waze_link(Some(3.1466), None), WAZE_UNAVAILABLE);
        assert_eq!(waze_link(None, None), WAZE_UNAVAILABLE);
    }

    #[test]
    fn empty_contact_fields_become_null() {
        let record = to_store_create(raw(&[]));
        assert_eq!(record.telephone.as_deref(), Some("03-2110 1234"));
        assert_eq!(record.email, None);
    }

    #[test]
    fn payload_parses_with_leading_bom() {
        let body = "\u{feff}{\"stores\": [{\"name\": \"A\", \"address\": \"B\"}]}";
        let stores = parse_store_payload(body).expect("payload should parse");
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].name, "A");
    }

    #[test]
    fn malformed_payload_is_an_upstream_error() {
        assert!(parse_store_payload("not json").is_err());
    }
}
