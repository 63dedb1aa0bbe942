// src/core/service_client.rs
//! HTTP client for the résumé analysis service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, error, info, trace};

use crate::core::ClientConfig;
use crate::error::AnalysisError;
use crate::types::{AnalysisResult, ResumeFile, UPLOAD_FIELD};

/// Anything that can turn a résumé into an analysis result
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, resume: &ResumeFile) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    /// Create new analysis client with configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(resume: &ResumeFile) -> Result<Form, AnalysisError> {
        let part = Part::bytes(resume.bytes.clone())
            .file_name(resume.file_name.clone())
            .mime_str(resume.content_type)?;

        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

#[async_trait]
impl ResumeAnalyzer for AnalysisClient {
    async fn analyze(&self, resume: &ResumeFile) -> Result<AnalysisResult, AnalysisError> {
        let form = Self::build_form(resume)?;

        info!(
            "Uploading {} ({} bytes) to {}",
            resume.file_name,
            resume.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Analysis request failed: {}", e);
                AnalysisError::from(e)
            })?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Analysis service returned {}: {}", status, error_text);
            return Err(AnalysisError::Server {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        trace!("Raw analysis response: {}", body);

        let result: AnalysisResult = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse analysis response: {}", e);
            AnalysisError::from(e)
        })?;

        debug!(
            "Analysis received: {} skills, {} education entries, {} job matches",
            result.skills.len(),
            result.education.len(),
            result.job_matches.len()
        );
        Ok(result)
    }
}
