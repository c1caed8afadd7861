//! Data types and associated functions and methods

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use validator::Validate;

/// An opaque row of a source CSV file, keyed by column name.
///
/// Column order is preserved through to the wire (serde_json's `preserve_order`
/// feature).
pub type Record = Map<String, Value>;

/// The pre-computed results document produced by the external processing
/// pipeline.
///
/// All four sections default to empty when missing from the file, so partial
/// documents still load.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessedResult {
    /// Zones currently flagged as critical.
    pub critical_zones: Vec<Value>,
    /// Per-subdivision risk analysis entries.
    pub risk_analysis: Vec<RiskZone>,
    /// Impact metrics keyed by category.
    pub impact_data: Map<String, Value>,
    /// Document metadata (generation time, source dataset, etc.).
    pub metadata: Map<String, Value>,
}

/// A single risk analysis entry.
///
/// The known keys are typed; anything else the processing pipeline emits is
/// carried through `extra` untouched, so aggregate endpoints remain lossless.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskZone {
    /// Meteorological subdivision name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdivision: Option<String>,
    /// Risk classification, e.g. "Critical", "High", "Moderate".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    /// Rainfall anomaly as a percentage of the long-term normal.
    // Number rather than f64 so integer anomalies round-trip without a
    // trailing ".0".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_percent: Option<Number>,
    /// Passthrough for fields this server does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An alert derived from a high-risk analysis entry.
///
/// The channel list is descriptive metadata only; no delivery happens here.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub region: String,
    pub severity: Number,
    pub risk_level: Option<String>,
    pub message: String,
    pub timestamp: String,
    pub channels: Vec<String>,
}

/// Response to the health check endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct Health {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

/// Response to the risk zones endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct RiskZones {
    pub zones: Vec<Value>,
    pub timestamp: String,
}

/// Response to the risk analysis endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct RiskAnalysis {
    pub analysis: Vec<RiskZone>,
    pub metadata: Map<String, Value>,
    pub timestamp: String,
}

/// Response to the impact data endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct ImpactData {
    pub impacts: Map<String, Value>,
    pub timestamp: String,
}

/// Response to the alerts endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct Alerts {
    pub alerts: Vec<Alert>,
    pub count: usize,
}

/// Response to the district endpoint.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictData {
    pub district: String,
    pub normal_data: Record,
    pub timestamp: String,
}

/// Response to the statistics endpoint.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_historical_records: usize,
    pub total_districts: usize,
    pub data_source: String,
    pub historical_period: String,
    pub last_updated: String,
    pub metadata: Map<String, Value>,
}

/// Response to the aggregate rainfall data endpoint, combining every section
/// of the processed results with the derived alerts for a single round trip.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RainfallData {
    pub critical_zones: Vec<Value>,
    pub risk_analysis: Vec<RiskZone>,
    pub impact_data: Map<String, Value>,
    pub metadata: Map<String, Value>,
    pub alerts: Vec<Alert>,
    pub timestamp: String,
}

/// Request body for the search endpoint. Both filters are optional and
/// combine with logical AND.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Exact, case-sensitive risk level to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    /// Case-insensitive substring to match against subdivision names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdivision: Option<String>,
}

/// Response to the search endpoint. Echoes the query it answered.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResults {
    pub results: Vec<RiskZone>,
    pub count: usize,
    pub query: SearchRequest,
    pub timestamp: String,
}

/// Response to a successful refresh request.
#[derive(Debug, Deserialize, Serialize)]
pub struct RefreshOutcome {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}
