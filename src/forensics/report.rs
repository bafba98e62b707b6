// src/forensics/report.rs
// Best-effort compliance report to a central collection node

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const REPORT_TIMEOUT_SECS: u64 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub team_name: String,
    pub session_id: String,
    pub scammer_text: String,
    pub ai_response: String,
    pub risk_score: u8,
    pub agents_active: Vec<String>,
}

#[derive(Clone)]
pub struct ComplianceReporter {
    client: Client,
    url: Option<String>,
    team_name: String,
}

impl ComplianceReporter {
    /// An empty URL disables reporting
    pub fn new(url: &str, team_name: &str) -> Self {
        let url = Some(url.trim().to_string()).filter(|u| !u.is_empty());
        Self {
            client: Client::new(),
            url,
            team_name: team_name.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    pub fn build(
        &self,
        session_id: &str,
        scammer_text: &str,
        ai_response: &str,
        risk_score: u8,
        persona: Option<&str>,
    ) -> ComplianceReport {
        let mut agents_active = vec!["Forensics_Module".to_string()];
        if let Some(persona) = persona {
            agents_active.insert(0, persona.to_string());
        }

        ComplianceReport {
            team_name: self.team_name.clone(),
            session_id: session_id.to_string(),
            scammer_text: scammer_text.to_string(),
            ai_response: ai_response.to_string(),
            risk_score,
            agents_active,
        }
    }

    /// Sends the report; failures are logged and otherwise ignored.
    pub async fn send(&self, report: ComplianceReport) {
        let Some(url) = &self.url else {
            debug!("Compliance reporting disabled");
            return;
        };

        let result = self
            .client
            .post(url)
            .json(&report)
            .timeout(Duration::from_secs(REPORT_TIMEOUT_SECS))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(session_id = %report.session_id, status = %response.status(), "Compliance report sent");
            }
            Ok(response) => {
                warn!(session_id = %report.session_id, status = %response.status(), "Compliance report rejected");
            }
            Err(e) => {
                warn!(session_id = %report.session_id, "Compliance node unreachable: {}", e);
            }
        }
    }

    /// Fire-and-forget on the runtime so the reply is never delayed
    pub fn spawn(&self, report: ComplianceReport) {
        if !self.is_enabled() {
            return;
        }
        let reporter = self.clone();
        tokio::spawn(async move {
            reporter.send(report).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_url_disables() {
        assert!(!ComplianceReporter::new("  ", "ScamHunters").is_enabled());
        assert!(ComplianceReporter::new("http://127.0.0.1:9/report", "ScamHunters").is_enabled());
    }

    #[test]
    fn test_report_payload() {
        let reporter = ComplianceReporter::new("", "ScamHunters");
        let report = reporter.build("s-1", "pay now", "Umm beta", 98, Some("savitri"));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["team_name"], "ScamHunters");
        assert_eq!(value["session_id"], "s-1");
        assert_eq!(value["risk_score"], 98);
        assert_eq!(value["agents_active"], serde_json::json!(["savitri", "Forensics_Module"]));
    }

    #[tokio::test]
    async fn test_unreachable_node_does_not_fail() {
        // Port 9 (discard) is closed on test machines; the send must just log
        let reporter = ComplianceReporter::new("http://127.0.0.1:9/report", "ScamHunters");
        let report = reporter.build("s-2", "hi", "hello", 45, None);
        reporter.send(report).await;
    }
}
