use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, params};
use thiserror::Error;
use tracing::info;

use crate::codec::{decode_list, encode_list, normalize_text};
use crate::model::{NewSiteRecord, StoredSiteRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS site_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        county TEXT,
        local_name_field_number TEXT,
        shpo_site_number TEXT,
        section_land_grant TEXT,
        township TEXT,
        range TEXT,
        is_update TEXT,
        quad_name TEXT,
        topo_date TEXT,
        site_area_m2 TEXT,
        utm_zone TEXT,
        utm_northing TEXT,
        utm_easting TEXT,
        datum TEXT,
        nrhp_status TEXT,
        owner_address TEXT,
        tenant_address TEXT,
        information_current_as_of TEXT,
        recorder_name_address TEXT,
        recording_organization TEXT,
        site_description TEXT,
        cultural_affiliation TEXT,
        cultural_other_prehistoric TEXT,
        cultural_other_historic TEXT,
        site_type TEXT,
        site_type_other TEXT,
        water_source TEXT,
        water_source_other TEXT,
        water_source_name TEXT,
        water_source_distance TEXT,
        topographic_location TEXT,
        topographic_other TEXT,
        materials_reported TEXT,
        materials_other TEXT,
        collection_status TEXT,
        repository TEXT,
        remote_sensing TEXT,
        remote_other TEXT,
        sampling_techniques TEXT,
        sampling_other TEXT,
        soil_type TEXT,
        land_use TEXT,
        land_use_other TEXT,
        contour_elevation TEXT,
        literature_sources TEXT,
        features_prehistoric TEXT,
        features_prehistoric_other TEXT,
        features_historic TEXT,
        features_historic_other TEXT,
        floral_faunal_remains TEXT,
        human_remains TEXT,
        artifact_descriptions TEXT,
        artifact_illustrations_attached INTEGER,
        sketch_map_attached INTEGER,
        topo_map_section_attached INTEGER,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP
    )
";

const COLUMNS: &str = "
    county, local_name_field_number, shpo_site_number, section_land_grant,
    township, range, is_update, quad_name, topo_date, site_area_m2,
    utm_zone, utm_northing, utm_easting, datum, nrhp_status,
    owner_address, tenant_address, information_current_as_of,
    recorder_name_address, recording_organization, site_description,
    cultural_affiliation, cultural_other_prehistoric, cultural_other_historic,
    site_type, site_type_other, water_source, water_source_other,
    water_source_name, water_source_distance, topographic_location,
    topographic_other, materials_reported, materials_other,
    collection_status, repository, remote_sensing, remote_other,
    sampling_techniques, sampling_other, soil_type, land_use,
    land_use_other, contour_elevation, literature_sources,
    features_prehistoric, features_prehistoric_other, features_historic,
    features_historic_other, floral_faunal_remains, human_remains,
    artifact_descriptions, artifact_illustrations_attached,
    sketch_map_attached, topo_map_section_attached
";

/// SQLite-backed site-record table.
///
/// Writes are single autocommitted inserts and reads are full-table scans;
/// the one connection sits behind a mutex.
#[derive(Debug)]
pub struct RecordStore {
    conn: Mutex<Connection>,
}

impl RecordStore {
    /// Opens (creating parent directories and the table as needed) the
    /// record database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        info!(path = %path.display(), "site record store ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts one submission and returns its generated id.
    ///
    /// Optional text is trimmed with blank collapsing to NULL; multi-select
    /// fields are JSON-encoded; flags are stored as 0/1. Required-ness is
    /// the caller's concern (`NewSiteRecord::missing_required`).
    pub fn insert(&self, record: &NewSiteRecord) -> Result<i64, StoreError> {
        let conn = self.conn.lock().expect("record store mutex poisoned");
        let sql = format!(
            "INSERT INTO site_records ({COLUMNS}) VALUES (\
             ?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,\
             ?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(params![
            normalize_text(&record.county),
            normalize_text(&record.local_name_field_number),
            normalize_text(&record.shpo_site_number),
            normalize_text(&record.section_land_grant),
            normalize_text(&record.township),
            normalize_text(&record.range),
            normalize_text(&record.is_update),
            normalize_text(&record.quad_name),
            normalize_text(&record.topo_date),
            normalize_text(&record.site_area_m2),
            normalize_text(&record.utm_zone),
            normalize_text(&record.utm_northing),
            normalize_text(&record.utm_easting),
            normalize_text(&record.datum),
            normalize_text(&record.nrhp_status),
            normalize_text(&record.owner_address),
            normalize_text(&record.tenant_address),
            normalize_text(&record.information_current_as_of),
            normalize_text(&record.recorder_name_address),
            normalize_text(&record.recording_organization),
            normalize_text(&record.site_description),
            encode_list(&record.cultural_affiliation),
            normalize_text(&record.cultural_other_prehistoric),
            normalize_text(&record.cultural_other_historic),
            encode_list(&record.site_type),
            normalize_text(&record.site_type_other),
            normalize_text(&record.water_source),
            normalize_text(&record.water_source_other),
            normalize_text(&record.water_source_name),
            normalize_text(&record.water_source_distance),
            encode_list(&record.topographic_location),
            normalize_text(&record.topographic_other),
            encode_list(&record.materials_reported),
            normalize_text(&record.materials_other),
            normalize_text(&record.collection_status),
            normalize_text(&record.repository),
            encode_list(&record.remote_sensing),
            normalize_text(&record.remote_other),
            encode_list(&record.sampling_techniques),
            normalize_text(&record.sampling_other),
            normalize_text(&record.soil_type),
            normalize_text(&record.land_use),
            normalize_text(&record.land_use_other),
            normalize_text(&record.contour_elevation),
            normalize_text(&record.literature_sources),
            encode_list(&record.features_prehistoric),
            normalize_text(&record.features_prehistoric_other),
            encode_list(&record.features_historic),
            normalize_text(&record.features_historic_other),
            normalize_text(&record.floral_faunal_remains),
            normalize_text(&record.human_remains),
            normalize_text(&record.artifact_descriptions),
            record.artifact_illustrations_attached,
            record.sketch_map_attached,
            record.topo_map_section_attached,
        ])?;
        Ok(conn.last_insert_rowid())
    }

    /// All stored records, newest first. `id DESC` breaks same-second
    /// `created_at` ties so the latest insert always lists first.
    pub fn list(&self) -> Result<Vec<StoredSiteRecord>, StoreError> {
        let conn = self.conn.lock().expect("record store mutex poisoned");
        let sql = format!(
            "SELECT id, {COLUMNS}, created_at FROM site_records \
             ORDER BY datetime(created_at) DESC, id DESC"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredSiteRecord {
                id: row.get(0)?,
                county: row.get(1)?,
                local_name_field_number: row.get(2)?,
                shpo_site_number: row.get(3)?,
                section_land_grant: row.get(4)?,
                township: row.get(5)?,
                range: row.get(6)?,
                is_update: row.get(7)?,
                quad_name: row.get(8)?,
                topo_date: row.get(9)?,
                site_area_m2: row.get(10)?,
                utm_zone: row.get(11)?,
                utm_northing: row.get(12)?,
                utm_easting: row.get(13)?,
                datum: row.get(14)?,
                nrhp_status: row.get(15)?,
                owner_address: row.get(16)?,
                tenant_address: row.get(17)?,
                information_current_as_of: row.get(18)?,
                recorder_name_address: row.get(19)?,
                recording_organization: row.get(20)?,
                site_description: row.get(21)?,
                cultural_affiliation: decode_list(row.get(22)?),
                cultural_other_prehistoric: row.get(23)?,
                cultural_other_historic: row.get(24)?,
                site_type: decode_list(row.get(25)?),
                site_type_other: row.get(26)?,
                water_source: row.get(27)?,
                water_source_other: row.get(28)?,
                water_source_name: row.get(29)?,
                water_source_distance: row.get(30)?,
                topographic_location: decode_list(row.get(31)?),
                topographic_other: row.get(32)?,
                materials_reported: decode_list(row.get(33)?),
                materials_other: row.get(34)?,
                collection_status: row.get(35)?,
                repository: row.get(36)?,
                remote_sensing: decode_list(row.get(37)?),
                remote_other: row.get(38)?,
                sampling_techniques: decode_list(row.get(39)?),
                sampling_other: row.get(40)?,
                soil_type: row.get(41)?,
                land_use: row.get(42)?,
                land_use_other: row.get(43)?,
                contour_elevation: row.get(44)?,
                literature_sources: row.get(45)?,
                features_prehistoric: decode_list(row.get(46)?),
                features_prehistoric_other: row.get(47)?,
                features_historic: decode_list(row.get(48)?),
                features_historic_other: row.get(49)?,
                floral_faunal_remains: row.get(50)?,
                human_remains: row.get(51)?,
                artifact_descriptions: row.get(52)?,
                artifact_illustrations_attached: row.get(53)?,
                sketch_map_attached: row.get(54)?,
                topo_map_section_attached: row.get(55)?,
                created_at: row.get(56)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        let conn = self.conn.lock().expect("record store mutex poisoned");
        let n = conn.query_row("SELECT COUNT(*) FROM site_records", [], |row| row.get(0))?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use crate::model::NewSiteRecord;
    use pretty_assertions::assert_eq;

    fn boone_submission() -> NewSiteRecord {
        NewSiteRecord {
            county: Some("Boone".to_string()),
            information_current_as_of: Some("2024-01-01".to_string()),
            recorder_name_address: Some("J. Doe".to_string()),
            cultural_affiliation: vec!["Woodland".to_string(), "Mississippian".to_string()],
            site_type: vec!["Mound".to_string()],
            township: Some("  T48N  ".to_string()),
            quad_name: Some("   ".to_string()),
            artifact_illustrations_attached: true,
            ..NewSiteRecord::default()
        }
    }

    #[test]
    fn insert_then_list_round_trips_arrays_and_flags() {
        let store = RecordStore::open_in_memory().expect("open");
        let id = store.insert(&boone_submission()).expect("insert");
        assert!(id > 0);

        let records = store.list().expect("list");
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, id);
        assert_eq!(r.county.as_deref(), Some("Boone"));
        assert_eq!(r.cultural_affiliation, vec!["Woodland", "Mississippian"]);
        assert_eq!(r.site_type, vec!["Mound"]);
        assert!(r.materials_reported.is_empty());
        assert!(r.artifact_illustrations_attached);
        assert!(!r.sketch_map_attached);
        assert!(!r.created_at.is_empty());
    }

    #[test]
    fn optional_text_is_trimmed_and_blank_becomes_null() {
        let store = RecordStore::open_in_memory().expect("open");
        store.insert(&boone_submission()).expect("insert");

        let r = &store.list().expect("list")[0];
        assert_eq!(r.township.as_deref(), Some("T48N"));
        assert_eq!(r.quad_name, None);
    }

    #[test]
    fn listing_is_newest_first_even_within_one_second() {
        let store = RecordStore::open_in_memory().expect("open");
        let first = store.insert(&boone_submission()).expect("insert");
        let second = store.insert(&boone_submission()).expect("insert");
        let third = store.insert(&boone_submission()).expect("insert");

        let ids: Vec<i64> = store.list().expect("list").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[test]
    fn malformed_stored_array_degrades_to_empty_without_failing() {
        let store = RecordStore::open_in_memory().expect("open");
        store.insert(&boone_submission()).expect("insert");
        {
            let conn = store.conn.lock().expect("lock");
            conn.execute("UPDATE site_records SET cultural_affiliation = 'not json'", [])
                .expect("corrupt");
        }

        let records = store.list().expect("list");
        assert_eq!(records[0].cultural_affiliation, Vec::<String>::new());
        assert_eq!(records[0].site_type, vec!["Mound"]);
    }

    #[test]
    fn open_persists_records_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data").join("site-records.db");

        let id = {
            let store = RecordStore::open(&path).expect("open");
            store.insert(&boone_submission()).expect("insert")
        };

        let store = RecordStore::open(&path).expect("reopen");
        assert_eq!(store.count().expect("count"), 1);
        assert_eq!(store.list().expect("list")[0].id, id);
    }
}
