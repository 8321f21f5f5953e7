use chrono::{DateTime, Utc};
use core_types::ViewModel;
use serde::Serialize;
use uuid::Uuid;

/// The downloadable snapshot of the dashboard. Field names mirror the view model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub dashboard: ViewModel,
}

impl ExportReport {
    pub fn from_view_model(model: &ViewModel) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            dashboard: model.clone(),
        }
    }

    /// e.g. `tradescope-report-20250630-120000.json`
    pub fn file_name(&self) -> String {
        format!(
            "tradescope-report-{}.json",
            self.generated_at.format("%Y%m%d-%H%M%S")
        )
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
