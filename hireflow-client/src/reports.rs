//! Screening report downloads

use std::sync::LazyLock;

use hireflow_core::timeout::{Operation, timeout_for};
use regex_lite::Regex;
use reqwest::header::CONTENT_DISPOSITION;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{ServiceClient, endpoints, remote_message};

static EXTENDED_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)filename\*=UTF-8''([^;]+)").expect("extended filename pattern is valid")
});

static PLAIN_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)filename="?([^";]+)"?"#).expect("plain filename pattern is valid")
});

/// A downloaded report file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ServiceClient {
    /// Download a screening report
    ///
    /// The body is returned as-is, not as an envelope.
    pub async fn download_report(&self, report_id: &str) -> Result<DownloadedReport> {
        let budget = timeout_for(Operation::Default);
        let url = self.url(&endpoints::screening_report_download(report_id));
        debug!("Downloading report {}", report_id);

        let response = self
            .client
            .get(&url)
            .timeout(budget)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, budget))?;

        let status = response.status().as_u16();
        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(e, budget))?;

        if !(200..300).contains(&status) {
            return Err(ClientError::Http {
                status,
                message: remote_message(&bytes),
            });
        }

        Ok(DownloadedReport {
            filename: filename_from_disposition(disposition.as_deref(), report_id),
            bytes: bytes.to_vec(),
        })
    }
}

/// Filename announced by a `Content-Disposition` header
///
/// The RFC 5987 `filename*=UTF-8''...` form wins over `filename="..."`.
/// Without a usable header the name is `report_{id}.md`.
pub fn filename_from_disposition(header: Option<&str>, report_id: &str) -> String {
    let fallback = || format!("report_{}.md", report_id);
    let Some(header) = header else {
        return fallback();
    };

    if let Some(encoded) = EXTENDED_FILENAME.captures(header).and_then(|c| c.get(1)) {
        if let Ok(decoded) = urlencoding::decode(encoded.as_str().trim()) {
            return decoded.into_owned();
        }
    }

    PLAIN_FILENAME
        .captures(header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(fallback)
}
