//! Resume listing and the resume generation dev tool

use hireflow_core::domain::result::{GeneratedResumes, ResumeListing};
use hireflow_core::dto::submission::GenerateResumes;
use hireflow_core::reconcile::{reconcile_generated, reconcile_listing};
use hireflow_core::timeout::{Operation, timeout_for};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use crate::{ServiceClient, endpoints};

/// Filters for the resume listing; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResumeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
}

impl ServiceClient {
    /// List resumes
    ///
    /// Accepts both the current `{resumes, ...}` listing and the legacy
    /// `{items, ...}` one.
    pub async fn list_resumes(&self, query: &ResumeQuery) -> Result<ResumeListing> {
        let url = self.url(endpoints::RESUMES);
        let request = self.client.get(&url).query(query);

        let data = self
            .send_enveloped(request, timeout_for(Operation::Default))
            .await?;
        Ok(reconcile_listing(&data))
    }

    /// Generate random resumes for a position (dev tool)
    ///
    /// The timeout grows with `count`.
    pub async fn generate_resumes(&self, req: &GenerateResumes) -> Result<GeneratedResumes> {
        req.validate()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

        let budget = timeout_for(req.operation());
        let url = self.url(endpoints::SCREENING_DEV_GENERATE);
        debug!("Generating {} resumes (timeout {:?})", req.count, budget);

        let request = self.client.post(&url).json(req);
        let data = self.send_enveloped(request, budget).await?;
        let generated = reconcile_generated(&data);

        info!(
            "Generated {} of {} resumes ({} skipped)",
            generated.added_count, req.count, generated.skipped_count
        );
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_skips_unset_filters() {
        let query = ResumeQuery {
            page: Some(2),
            keyword: Some("rust".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({"page": 2, "keyword": "rust"}));
    }

    #[tokio::test]
    async fn test_generate_rejects_zero_count_before_sending() {
        let client = ServiceClient::new("http://127.0.0.1:9");
        let err = client
            .generate_resumes(&GenerateResumes {
                position: json!({"position": "QA"}),
                count: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
