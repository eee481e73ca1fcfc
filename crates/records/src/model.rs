use serde::{Deserialize, Serialize};

/// Wire names of the fields a submission must carry non-blank, in the order
/// they are reported back on rejection.
pub const REQUIRED_FIELDS: [&str; 3] = ["county", "informationCurrentAsOf", "recorderNameAddress"];

/// An incoming site-record submission.
///
/// The form posts camelCase JSON; every field is optional at the parse
/// layer so a partial form still deserializes, with required-ness enforced
/// by `missing_required`. Multi-select inputs arrive as string arrays,
/// attachment flags as booleans.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewSiteRecord {
    pub county: Option<String>,
    pub local_name_field_number: Option<String>,
    pub shpo_site_number: Option<String>,
    pub section_land_grant: Option<String>,
    pub township: Option<String>,
    pub range: Option<String>,
    pub is_update: Option<String>,
    pub quad_name: Option<String>,
    pub topo_date: Option<String>,
    pub site_area_m2: Option<String>,
    pub utm_zone: Option<String>,
    pub utm_northing: Option<String>,
    pub utm_easting: Option<String>,
    pub datum: Option<String>,
    pub nrhp_status: Option<String>,
    pub owner_address: Option<String>,
    pub tenant_address: Option<String>,
    pub information_current_as_of: Option<String>,
    pub recorder_name_address: Option<String>,
    pub recording_organization: Option<String>,
    pub site_description: Option<String>,
    pub cultural_affiliation: Vec<String>,
    pub cultural_other_prehistoric: Option<String>,
    pub cultural_other_historic: Option<String>,
    pub site_type: Vec<String>,
    pub site_type_other: Option<String>,
    pub water_source: Option<String>,
    pub water_source_other: Option<String>,
    pub water_source_name: Option<String>,
    pub water_source_distance: Option<String>,
    pub topographic_location: Vec<String>,
    pub topographic_other: Option<String>,
    pub materials_reported: Vec<String>,
    pub materials_other: Option<String>,
    pub collection_status: Option<String>,
    pub repository: Option<String>,
    pub remote_sensing: Vec<String>,
    pub remote_other: Option<String>,
    pub sampling_techniques: Vec<String>,
    pub sampling_other: Option<String>,
    pub soil_type: Option<String>,
    pub land_use: Option<String>,
    pub land_use_other: Option<String>,
    pub contour_elevation: Option<String>,
    pub literature_sources: Option<String>,
    pub features_prehistoric: Vec<String>,
    pub features_prehistoric_other: Option<String>,
    pub features_historic: Vec<String>,
    pub features_historic_other: Option<String>,
    pub floral_faunal_remains: Option<String>,
    pub human_remains: Option<String>,
    pub artifact_descriptions: Option<String>,
    pub artifact_illustrations_attached: bool,
    pub sketch_map_attached: bool,
    pub topo_map_section_attached: bool,
}

impl NewSiteRecord {
    /// Wire names of required fields that are absent or blank after
    /// trimming. Empty means the submission may be written.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let checks = [
            (REQUIRED_FIELDS[0], &self.county),
            (REQUIRED_FIELDS[1], &self.information_current_as_of),
            (REQUIRED_FIELDS[2], &self.recorder_name_address),
        ];
        checks
            .into_iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(name, _)| name)
            .collect()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// A persisted record as returned by the listing endpoint: snake_case keys
/// matching the column names, arrays decoded, flags as booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSiteRecord {
    pub id: i64,
    pub county: Option<String>,
    pub local_name_field_number: Option<String>,
    pub shpo_site_number: Option<String>,
    pub section_land_grant: Option<String>,
    pub township: Option<String>,
    pub range: Option<String>,
    pub is_update: Option<String>,
    pub quad_name: Option<String>,
    pub topo_date: Option<String>,
    pub site_area_m2: Option<String>,
    pub utm_zone: Option<String>,
    pub utm_northing: Option<String>,
    pub utm_easting: Option<String>,
    pub datum: Option<String>,
    pub nrhp_status: Option<String>,
    pub owner_address: Option<String>,
    pub tenant_address: Option<String>,
    pub information_current_as_of: Option<String>,
    pub recorder_name_address: Option<String>,
    pub recording_organization: Option<String>,
    pub site_description: Option<String>,
    pub cultural_affiliation: Vec<String>,
    pub cultural_other_prehistoric: Option<String>,
    pub cultural_other_historic: Option<String>,
    pub site_type: Vec<String>,
    pub site_type_other: Option<String>,
    pub water_source: Option<String>,
    pub water_source_other: Option<String>,
    pub water_source_name: Option<String>,
    pub water_source_distance: Option<String>,
    pub topographic_location: Vec<String>,
    pub topographic_other: Option<String>,
    pub materials_reported: Vec<String>,
    pub materials_other: Option<String>,
    pub collection_status: Option<String>,
    pub repository: Option<String>,
    pub remote_sensing: Vec<String>,
    pub remote_other: Option<String>,
    pub sampling_techniques: Vec<String>,
    pub sampling_other: Option<String>,
    pub soil_type: Option<String>,
    pub land_use: Option<String>,
    pub land_use_other: Option<String>,
    pub contour_elevation: Option<String>,
    pub literature_sources: Option<String>,
    pub features_prehistoric: Vec<String>,
    pub features_prehistoric_other: Option<String>,
    pub features_historic: Vec<String>,
    pub features_historic_other: Option<String>,
    pub floral_faunal_remains: Option<String>,
    pub human_remains: Option<String>,
    pub artifact_descriptions: Option<String>,
    pub artifact_illustrations_attached: bool,
    pub sketch_map_attached: bool,
    pub topo_map_section_attached: bool,
    pub created_at: String,
}
