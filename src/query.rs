//! Query operations over the in-memory rainfall data.
//!
//! Every operation reads a single [DataSnapshot] generation, so the view is
//! consistent even while a reload is in flight. Responses carry an
//! informational timestamp captured at call time.

use crate::error::FloodcastError;
use crate::models::{
    Alert, Alerts, DistrictData, ImpactData, RainfallData, RiskAnalysis, RiskZones, SearchRequest,
    SearchResults, Statistics,
};
use crate::store::{DataSnapshot, DataStore};

use chrono::Utc;
use serde_json::Number;
use std::sync::Arc;

/// Provider of the historical and normals datasets.
const DATA_SOURCE: &str = "India Meteorological Department";

/// Year range covered by the historical rainfall CSV.
const HISTORICAL_PERIOD: &str = "1901-2015";

/// Notification channels attached to every derived alert. Descriptive
/// metadata only; nothing is delivered.
const ALERT_CHANNELS: [&str; 4] = ["Email", "WhatsApp", "SMS", "Phone"];

/// Return the current time as an RFC 3339 timestamp.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Read operations (and the reload operation) over a [DataStore].
pub struct QueryService {
    store: Arc<DataStore>,
}

impl QueryService {
    /// Return a new [QueryService] over the given store.
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// The zones currently flagged as critical, or empty if no processed
    /// results are loaded.
    pub fn current_risk_zones(&self) -> RiskZones {
        let snapshot = self.store.snapshot();
        let zones = snapshot
            .processed
            .as_ref()
            .map(|processed| processed.critical_zones.clone())
            .unwrap_or_default();
        RiskZones {
            zones,
            timestamp: timestamp(),
        }
    }

    /// The full risk analysis with its metadata.
    pub fn risk_analysis(&self) -> RiskAnalysis {
        let snapshot = self.store.snapshot();
        let (analysis, metadata) = snapshot
            .processed
            .as_ref()
            .map(|processed| (processed.risk_analysis.clone(), processed.metadata.clone()))
            .unwrap_or_default();
        RiskAnalysis {
            analysis,
            metadata,
            timestamp: timestamp(),
        }
    }

    /// The impact metrics section of the processed results.
    pub fn impact_data(&self) -> ImpactData {
        let snapshot = self.store.snapshot();
        let impacts = snapshot
            .processed
            .as_ref()
            .map(|processed| processed.impact_data.clone())
            .unwrap_or_default();
        ImpactData {
            impacts,
            timestamp: timestamp(),
        }
    }

    /// Alerts derived from the Critical and High risk analysis entries.
    pub fn alerts(&self) -> Alerts {
        let alerts = derive_alerts(&self.store.snapshot());
        Alerts {
            count: alerts.len(),
            alerts,
        }
    }

    /// The normals record for one district.
    ///
    /// Lookup is exact; callers normalise the name to upper case beforehand.
    pub fn district_data(&self, district: &str) -> Result<DistrictData, FloodcastError> {
        let snapshot = self.store.snapshot();
        let normal_data =
            snapshot
                .normals
                .get(district)
                .cloned()
                .ok_or(FloodcastError::DistrictNotFound {
                    district: district.to_string(),
                })?;
        Ok(DistrictData {
            district: district.to_string(),
            normal_data,
            timestamp: timestamp(),
        })
    }

    /// Aggregate counts and dataset descriptors.
    pub fn statistics(&self) -> Statistics {
        let snapshot = self.store.snapshot();
        let metadata = snapshot
            .processed
            .as_ref()
            .map(|processed| processed.metadata.clone())
            .unwrap_or_default();
        Statistics {
            total_historical_records: snapshot.historical.len(),
            total_districts: snapshot.normals.len(),
            data_source: DATA_SOURCE.to_string(),
            historical_period: HISTORICAL_PERIOD.to_string(),
            last_updated: timestamp(),
            metadata,
        }
    }

    /// Every section of the processed results plus the derived alerts, for
    /// dashboards that want one round trip.
    pub fn rainfall_data(&self) -> RainfallData {
        let snapshot = self.store.snapshot();
        let alerts = derive_alerts(&snapshot);
        let processed = snapshot.processed.as_ref();
        RainfallData {
            critical_zones: processed
                .map(|p| p.critical_zones.clone())
                .unwrap_or_default(),
            risk_analysis: processed
                .map(|p| p.risk_analysis.clone())
                .unwrap_or_default(),
            impact_data: processed.map(|p| p.impact_data.clone()).unwrap_or_default(),
            metadata: processed.map(|p| p.metadata.clone()).unwrap_or_default(),
            alerts,
            timestamp: timestamp(),
        }
    }

    /// Risk analysis entries matching the request filters, in source order.
    ///
    /// The risk level filter is an exact, case-sensitive match; the
    /// subdivision filter is a case-insensitive substring match. Both are
    /// optional and combine with logical AND.
    pub fn search(&self, query: SearchRequest) -> SearchResults {
        let snapshot = self.store.snapshot();
        let subdivision_needle = query.subdivision.as_deref().map(str::to_lowercase);
        let mut results = Vec::new();
        if let Some(processed) = &snapshot.processed {
            for zone in &processed.risk_analysis {
                if let Some(risk_level) = &query.risk_level {
                    if zone.risk_level.as_deref() != Some(risk_level.as_str()) {
                        continue;
                    }
                }
                if let Some(needle) = &subdivision_needle {
                    let subdivision = zone
                        .subdivision
                        .as_deref()
                        .unwrap_or_default()
                        .to_lowercase();
                    if !subdivision.contains(needle.as_str()) {
                        continue;
                    }
                }
                results.push(zone.clone());
            }
        }
        SearchResults {
            count: results.len(),
            results,
            query,
            timestamp: timestamp(),
        }
    }

    /// Reload all source files from disk.
    ///
    /// Delegates to [DataStore::load]; on failure the previously published
    /// snapshot stays in place.
    pub fn reload(&self) -> Result<(), FloodcastError> {
        self.store.load()
    }
}

/// Synthesise alerts from the risk analysis entries whose level is exactly
/// "Critical" or "High", preserving source order.
fn derive_alerts(snapshot: &DataSnapshot) -> Vec<Alert> {
    let Some(processed) = &snapshot.processed else {
        return Vec::new();
    };
    processed
        .risk_analysis
        .iter()
        .filter(|zone| matches!(zone.risk_level.as_deref(), Some("Critical") | Some("High")))
        .map(|zone| {
            let subdivision = zone.subdivision.clone().unwrap_or_default();
            let severity = zone
                .anomaly_percent
                .clone()
                .unwrap_or_else(|| Number::from(0));
            Alert {
                id: subdivision.to_lowercase().replace(' ', "_"),
                message: format!(
                    "{}: {} rainfall anomaly ({}%)",
                    subdivision,
                    zone.risk_level.as_deref().unwrap_or_default(),
                    severity
                ),
                region: subdivision,
                severity,
                risk_level: zone.risk_level.clone(),
                timestamp: timestamp(),
                channels: ALERT_CHANNELS.iter().map(|channel| channel.to_string()).collect(),
            }
        })
        .collect()
}
