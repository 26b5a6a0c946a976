// ── Emergency-resource directory client ──
//
// Queries the OpenStreetMap Overpass API for emergency services around a
// reference position. Each category is an independent fallible query; the
// combined fetch gathers all four with fixed arity and degrades each one
// to an empty list on failure, so a partial outage never poisons the rest.

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;

/// Default public Overpass endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Category of a directory record. Fixed set -- the combined fetch
/// concatenates categories in this declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Hospital,
    FireStation,
    PoliceStation,
    Shelter,
    Ambulance,
}

impl ServiceKind {
    /// Fallback dispatch number when the OSM record carries no phone tag.
    fn default_contact(self) -> &'static str {
        match self {
            Self::Hospital | Self::Ambulance => "102",
            Self::FireStation => "101",
            Self::PoliceStation => "100",
            Self::Shelter => "911",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::FireStation => "fire",
            Self::PoliceStation => "police",
            Self::Shelter => "shelter",
            Self::Ambulance => "ambulance",
        }
    }

    fn fallback_name(self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::FireStation => "Fire Station",
            Self::PoliceStation => "Police Station",
            Self::Shelter => "Emergency Shelter",
            Self::Ambulance => "Ambulance Unit",
        }
    }
}

/// One record from the directory, already normalized: name, contact,
/// capacity, and load are always present. Defaulting happens here, at the
/// ingestion boundary, so downstream invariants hold unconditionally.
#[derive(Debug, Clone)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub kind: ServiceKind,
    pub lat: f64,
    pub lng: f64,
    pub contact: String,
    pub capacity: u32,
    pub current_load: u32,
    pub address: Option<String>,
}

// ── Overpass wire types ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: OverpassTags,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassTags {
    name: Option<String>,
    phone: Option<String>,
    #[serde(rename = "contact:phone")]
    contact_phone: Option<String>,
    #[serde(rename = "addr:full")]
    addr_full: Option<String>,
    #[serde(rename = "addr:street")]
    addr_street: Option<String>,
}

impl OverpassElement {
    /// Node elements carry `lat`/`lon` directly; way elements only have a
    /// computed `center`. Falls back to the query origin as a last resort.
    fn position(&self, origin: (f64, f64)) -> (f64, f64) {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(c)) => (c.lat, c.lon),
            _ => origin,
        }
    }
}

// ── Client ──────────────────────────────────────────────────────────

/// HTTP client for the Overpass emergency-resource directory.
pub struct DirectoryClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl DirectoryClient {
    /// Create a client against the given Overpass endpoint.
    pub fn new(endpoint: Url, timeout: std::time::Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Fetch all four resource categories around `(lat, lng)` within
    /// `radius_m` meters.
    ///
    /// Fixed-arity gather: each category query fails independently and
    /// degrades to an empty list. Results are concatenated in a fixed
    /// category order, then ambulance units are synthesized from the first
    /// three hospitals (the directory has no ambulance records of its own).
    pub async fn fetch_all(&self, lat: f64, lng: f64, radius_m: u32) -> Vec<ServiceRecord> {
        let (hospitals, fire, police, shelters) = tokio::join!(
            self.fetch_category(ServiceKind::Hospital, lat, lng, radius_m),
            self.fetch_category(ServiceKind::FireStation, lat, lng, radius_m),
            self.fetch_category(ServiceKind::PoliceStation, lat, lng, radius_m),
            self.fetch_category(ServiceKind::Shelter, lat, lng, radius_m),
        );

        let hospitals = or_empty(hospitals, ServiceKind::Hospital);
        let fire = or_empty(fire, ServiceKind::FireStation);
        let police = or_empty(police, ServiceKind::PoliceStation);
        let shelters = or_empty(shelters, ServiceKind::Shelter);

        let ambulances = synthesize_ambulances(&hospitals);

        let mut all = hospitals;
        all.extend(fire);
        all.extend(police);
        all.extend(shelters);
        all.extend(ambulances);
        debug!(count = all.len(), "directory fetch complete");
        all
    }

    /// Fetch a single category. Public so callers can refresh one kind.
    pub async fn fetch_category(
        &self,
        kind: ServiceKind,
        lat: f64,
        lng: f64,
        radius_m: u32,
    ) -> Result<Vec<ServiceRecord>, Error> {
        let query = overpass_query(kind, lat, lng, radius_m);
        debug!(?kind, radius_m, "querying directory");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .body(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(Error::Directory {
                message: format!("HTTP {status}: {preview}"),
            });
        }

        let body = resp.text().await?;
        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        Ok(parsed
            .elements
            .into_iter()
            .enumerate()
            .map(|(idx, el)| into_record(kind, idx, el, (lat, lng)))
            .collect())
    }
}

/// Overpass QL for one category. Nodes and ways both matter -- larger
/// facilities are usually mapped as ways, which only yield a `center`.
fn overpass_query(kind: ServiceKind, lat: f64, lng: f64, radius_m: u32) -> String {
    let selectors: &[&str] = match kind {
        ServiceKind::Hospital => &[r#"node["amenity"="hospital"]"#, r#"way["amenity"="hospital"]"#],
        ServiceKind::FireStation => {
            &[r#"node["amenity"="fire_station"]"#, r#"way["amenity"="fire_station"]"#]
        }
        ServiceKind::PoliceStation => {
            &[r#"node["amenity"="police"]"#, r#"way["amenity"="police"]"#]
        }
        ServiceKind::Shelter => &[
            r#"node["amenity"="shelter"]"#,
            r#"way["amenity"="shelter"]"#,
            r#"node["emergency"="assembly_point"]"#,
            r#"way["social_facility"="shelter"]"#,
        ],
        // Ambulances are synthesized, never queried.
        ServiceKind::Ambulance => &[],
    };

    let mut q = String::from("[out:json];\n(\n");
    for sel in selectors {
        q.push_str(&format!("  {sel}(around:{radius_m},{lat},{lng});\n"));
    }
    q.push_str(");\nout center;\n");
    q
}

fn into_record(
    kind: ServiceKind,
    idx: usize,
    el: OverpassElement,
    origin: (f64, f64),
) -> ServiceRecord {
    let (lat, lng) = el.position(origin);
    let name = el
        .tags
        .name
        .clone()
        .unwrap_or_else(|| format!("{} {}", kind.fallback_name(), idx + 1));
    let contact = el
        .tags
        .phone
        .clone()
        .or(el.tags.contact_phone.clone())
        .unwrap_or_else(|| kind.default_contact().to_owned());
    let address = el.tags.addr_full.clone().or(el.tags.addr_street.clone());

    // OSM carries no occupancy data; capacity/load are seeded per category
    // (large facilities get a simulated census, vehicles a crew size).
    let mut rng = rand::thread_rng();
    let (capacity, current_load) = match kind {
        ServiceKind::Hospital => (rng.gen_range(50..200), rng.gen_range(20..120)),
        ServiceKind::Shelter => (rng.gen_range(100..500), rng.gen_range(20..120)),
        ServiceKind::FireStation => (6, 0),
        ServiceKind::PoliceStation => (4, 0),
        ServiceKind::Ambulance => (4, 0),
    };
    let current_load = current_load.min(capacity);

    ServiceRecord {
        id: format!("{}-{}", kind.id_prefix(), el.id),
        name,
        kind,
        lat,
        lng,
        contact,
        capacity,
        current_load,
        address,
    }
}

/// Ambulance units staged at the first few hospitals, offset slightly so
/// they don't render on top of their host facility.
fn synthesize_ambulances(hospitals: &[ServiceRecord]) -> Vec<ServiceRecord> {
    let mut rng = rand::thread_rng();
    hospitals
        .iter()
        .take(3)
        .enumerate()
        .map(|(idx, hospital)| ServiceRecord {
            id: format!("ambulance-{}", idx + 1),
            name: format!("Ambulance Unit {}", idx + 1),
            kind: ServiceKind::Ambulance,
            lat: hospital.lat + (rng.r#gen::<f64>() - 0.5) * 0.01,
            lng: hospital.lng + (rng.r#gen::<f64>() - 0.5) * 0.01,
            contact: hospital.contact.clone(),
            capacity: 4,
            current_load: 0,
            address: None,
        })
        .collect()
}

fn or_empty(
    result: Result<Vec<ServiceRecord>, Error>,
    kind: ServiceKind,
) -> Vec<ServiceRecord> {
    match result {
        Ok(records) => records,
        Err(e) => {
            warn!(?kind, error = %e, "directory category fetch failed, continuing without it");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_includes_radius_and_origin() {
        let q = overpass_query(ServiceKind::Hospital, 40.7, -74.0, 5000);
        assert!(q.contains("around:5000,40.7,-74"));
        assert!(q.contains(r#"node["amenity"="hospital"]"#));
        assert!(q.contains("out center;"));
    }

    #[test]
    fn shelter_query_covers_assembly_points() {
        let q = overpass_query(ServiceKind::Shelter, 0.0, 0.0, 1000);
        assert!(q.contains(r#"emergency"="assembly_point"#));
        assert!(q.contains(r#"social_facility"="shelter"#));
    }

    #[test]
    fn record_defaults_name_and_contact() {
        let el = OverpassElement {
            id: 42,
            lat: Some(1.0),
            lon: Some(2.0),
            center: None,
            tags: OverpassTags::default(),
        };
        let rec = into_record(ServiceKind::FireStation, 0, el, (0.0, 0.0));
        assert_eq!(rec.id, "fire-42");
        assert_eq!(rec.name, "Fire Station 1");
        assert_eq!(rec.contact, "101");
        assert_eq!((rec.capacity, rec.current_load), (6, 0));
    }

    #[test]
    fn way_elements_use_center_position() {
        let el = OverpassElement {
            id: 7,
            lat: None,
            lon: None,
            center: Some(OverpassCenter { lat: 9.0, lon: 8.0 }),
            tags: OverpassTags::default(),
        };
        let rec = into_record(ServiceKind::Hospital, 0, el, (0.0, 0.0));
        assert_eq!((rec.lat, rec.lng), (9.0, 8.0));
    }

    #[test]
    fn load_never_exceeds_capacity() {
        for _ in 0..100 {
            let el = OverpassElement {
                id: 1,
                lat: Some(0.0),
                lon: Some(0.0),
                center: None,
                tags: OverpassTags::default(),
            };
            let rec = into_record(ServiceKind::Hospital, 0, el, (0.0, 0.0));
            assert!(rec.current_load <= rec.capacity);
        }
    }

    #[test]
    fn ambulances_come_from_first_three_hospitals() {
        let hospital = |id: &str| ServiceRecord {
            id: id.to_owned(),
            name: "H".into(),
            kind: ServiceKind::Hospital,
            lat: 10.0,
            lng: 20.0,
            contact: "102".into(),
            capacity: 100,
            current_load: 10,
            address: None,
        };
        let hospitals = vec![hospital("a"), hospital("b"), hospital("c"), hospital("d")];
        let ambulances = synthesize_ambulances(&hospitals);
        assert_eq!(ambulances.len(), 3);
        assert!(ambulances.iter().all(|a| a.kind == ServiceKind::Ambulance));
        assert!(ambulances.iter().all(|a| (a.lat - 10.0).abs() < 0.01));
    }
}
