use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    /// Id of the signed-in teacher or student, used to tell sent from received messages.
    pub user_id: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            user_id: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("CLASSROOM_API_URL")
            .map_err(|_| AppError::Config("CLASSROOM_API_URL is not set".to_string()))?;
        if base_url.trim().is_empty() {
            return Err(AppError::Config("CLASSROOM_API_URL is empty".to_string()));
        }

        let token = env::var("CLASSROOM_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let user_id = env::var("CLASSROOM_USER_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        let timeout_secs = match env::var("CLASSROOM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("CLASSROOM_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(base_url);
        config.token = token;
        config.user_id = user_id;
        config.timeout = Duration::from_secs(timeout_secs);
        Ok(config)
    }

    /// Root of the REST surface, e.g. `http://localhost:8001/api`.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url)
    }
}
