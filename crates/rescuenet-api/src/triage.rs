// ── Triage advisory client ──
//
// Sends a free-text report to an external classification service and gets
// back a severity label. Strictly advisory: callers must treat every error
// here as "use the default severity" -- a report is never blocked because
// classification was slow or down.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Request payload for the triage service.
#[derive(Debug, Serialize)]
struct TriageRequest<'a> {
    description: &'a str,
    incident_type: &'a str,
}

/// Severity assessment returned by the triage service.
///
/// The label is kept as a raw string here; `rescuenet-core` maps it onto
/// its `Severity` enum and falls back to the default on anything unknown.
#[derive(Debug, Clone, Deserialize)]
pub struct TriageAssessment {
    pub severity: String,
    #[serde(default)]
    pub rationale: Option<String>,
}

/// HTTP client for the triage advisory service.
pub struct TriageClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl TriageClient {
    /// Create a client with a hard request timeout. Triage is advisory, so
    /// the timeout should be short enough that report submission stays snappy.
    pub fn new(endpoint: Url, timeout: std::time::Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Classify a report's severity from its description and category.
    pub async fn assess(
        &self,
        description: &str,
        incident_type: &str,
    ) -> Result<TriageAssessment, Error> {
        debug!(incident_type, "requesting triage assessment");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&TriageRequest {
                description,
                incident_type,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(Error::Triage {
                message: format!("HTTP {status}: {preview}"),
            });
        }

        let body = resp.text().await?;
        let assessment: TriageAssessment =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        debug!(severity = %assessment.severity, "triage assessment received");
        Ok(assessment)
    }
}
