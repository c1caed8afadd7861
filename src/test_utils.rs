use crate::models::{ProcessedResult, Record};
use crate::query::QueryService;
use crate::store::{DataSnapshot, DataStore};

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Processed results fixture: one critical zone and four risk analysis
/// entries spanning the Critical, High and Moderate levels.
pub(crate) fn test_processed_result() -> ProcessedResult {
    serde_json::from_str(
        r#"{
            "criticalZones": [{"name": "Zone A", "state": "Kerala"}],
            "riskAnalysis": [
                {"subdivision": "Kerala", "riskLevel": "Critical", "anomalyPercent": 45},
                {"subdivision": "Coastal Karnataka", "riskLevel": "High", "anomalyPercent": 32.5},
                {"subdivision": "Punjab", "riskLevel": "Moderate", "anomalyPercent": 12},
                {"subdivision": "Assam", "riskLevel": "High", "anomalyPercent": 28}
            ],
            "impactData": {"population": 1200000, "cropArea": "45000 ha"},
            "metadata": {"generated": "2024-06-01", "model": "cascade-v2"}
        }"#,
    )
    .unwrap()
}

fn csv_row(columns: &[(&str, &str)]) -> Record {
    columns
        .iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect()
}

/// A snapshot with two historical rows, two districts and the processed
/// results fixture.
pub(crate) fn test_snapshot() -> DataSnapshot {
    let historical = vec![
        csv_row(&[("SUBDIVISION", "Kerala"), ("YEAR", "1901"), ("ANNUAL", "3248.6")]),
        csv_row(&[("SUBDIVISION", "Kerala"), ("YEAR", "1902"), ("ANNUAL", "3326.6")]),
    ];
    let mut normals = HashMap::new();
    normals.insert(
        "PUNE".to_string(),
        csv_row(&[("STATE", "MAHARASHTRA"), ("DISTRICT", "PUNE"), ("ANNUAL", "750")]),
    );
    normals.insert(
        "ERNAKULAM".to_string(),
        csv_row(&[("STATE", "KERALA"), ("DISTRICT", "ERNAKULAM"), ("ANNUAL", "3100")]),
    );
    DataSnapshot {
        historical,
        normals,
        processed: Some(test_processed_result()),
    }
}

/// A [QueryService] over the populated test snapshot.
pub(crate) fn test_query_service() -> QueryService {
    QueryService::new(Arc::new(DataStore::with_snapshot(test_snapshot())))
}

/// A [QueryService] over an entirely empty store.
pub(crate) fn empty_query_service() -> QueryService {
    QueryService::new(Arc::new(DataStore::with_snapshot(DataSnapshot::default())))
}
