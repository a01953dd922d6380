//! Jenkins HTTP client
//!
//! Retrieves console and per-stage logs with basic authentication. Every
//! request is bounded by the configured timeout.

use async_trait::async_trait;
use logsift_core::{LogSource, LogsiftError, Target};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use crate::describe::{stage_node_ids, BuildDescription};
use crate::error::JenkinsError;
use crate::Result;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Jenkins connection settings
#[derive(Clone)]
pub struct JenkinsConfig {
    /// Base URL, always ending in `/`
    pub base_url: String,
    pub user: String,
    pub token: String,
    pub timeout: Duration,
}

impl fmt::Debug for JenkinsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JenkinsConfig")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl JenkinsConfig {
    /// Create a config, normalising the base URL to end in `/`
    pub fn new(base_url: &str, user: &str, token: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        JenkinsConfig {
            base_url,
            user: user.to_string(),
            token: token.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_url(&self, job_name: &str, build_id: &str) -> String {
        format!("{}job/{}/{}/", self.base_url, job_name, build_id)
    }

    /// Full console log of a build
    pub fn console_text_url(&self, job_name: &str, build_id: &str) -> String {
        format!("{}consoleText", self.build_url(job_name, build_id))
    }

    /// Pipeline structure of a build
    pub fn describe_url(&self, job_name: &str, build_id: &str) -> String {
        format!("{}wfapi/describe", self.build_url(job_name, build_id))
    }

    /// Log of one execution node
    pub fn node_log_url(&self, job_name: &str, build_id: &str, node_id: &str) -> String {
        format!(
            "{}execution/node/{}/log/",
            self.build_url(job_name, build_id),
            node_id
        )
    }
}

/// Jenkins client for log retrieval
pub struct JenkinsClient {
    config: JenkinsConfig,
    http_client: reqwest::Client,
}

impl JenkinsClient {
    /// Create a new Jenkins client
    pub fn new(config: JenkinsConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("logsift/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| JenkinsError::Client(e.to_string()))?;

        Ok(JenkinsClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &JenkinsConfig {
        &self.config
    }

    /// Fetch the log of a build, or of one stage when `stage_id` is given
    pub async fn get_log(
        &self,
        job_name: &str,
        build_id: &str,
        stage_id: Option<&str>,
    ) -> Result<String> {
        match stage_id {
            Some(stage_id) => self.get_stage_log(job_name, build_id, stage_id).await,
            None => {
                let url = self.config.console_text_url(job_name, build_id);
                self.fetch_text(&url).await
            }
        }
    }

    /// Fetch and concatenate the logs of every execution node of a stage
    async fn get_stage_log(&self, job_name: &str, build_id: &str, stage_id: &str) -> Result<String> {
        let describe_url = self.config.describe_url(job_name, build_id);
        let body = self.fetch_text(&describe_url).await?;
        let description: BuildDescription =
            serde_json::from_str(&body).map_err(|source| JenkinsError::InvalidDescription {
                url: describe_url.clone(),
                source,
            })?;

        let node_ids = stage_node_ids(&description, stage_id);
        if node_ids.is_empty() {
            return Err(JenkinsError::NoExecutionNodes(stage_id.to_string()));
        }
        info!(
            stage_id = %stage_id,
            nodes = node_ids.len(),
            "Found execution nodes for stage; fetching logs"
        );

        let mut logs = Vec::with_capacity(node_ids.len());
        for node_id in &node_ids {
            let url = self.config.node_log_url(job_name, build_id, node_id);
            logs.push(self.fetch_text(&url).await?);
        }
        Ok(logs.join("\n"))
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching");
        let response = self
            .http_client
            .get(url)
            .basic_auth(&self.config.user, Some(&self.config.token))
            .send()
            .await
            .map_err(|e| JenkinsError::request(url, e))?
            .error_for_status()
            .map_err(|e| JenkinsError::request(url, e))?;

        response
            .text()
            .await
            .map_err(|e| JenkinsError::request(url, e))
    }
}

#[async_trait]
impl LogSource for JenkinsClient {
    async fn fetch_log(&self, target: &Target) -> logsift_core::Result<String> {
        self.get_log(&target.job_name, &target.build_id, target.stage_id.as_deref())
            .await
            .map_err(|e| LogsiftError::Fetch {
                target: target.label(),
                message: e.to_string(),
            })
    }
}
