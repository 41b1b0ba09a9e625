use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::Result;
use crate::model::{AcademicRecord, Credentials};
use crate::session::{AuthOutcome, DashboardBackend};

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Talks to the scorecard server over HTTP. The cookie store carries the
/// server session from `/login` to `/dashboard` and `/logout`.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(HttpBackend {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn authenticate(&self, credentials: &Credentials) -> AuthOutcome {
        let semester = credentials.current_semester.to_string();
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("current_semester", semester.as_str()),
        ];

        let response = match self.client.post(self.url("/login")).form(&form).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Login request failed: {}", e);
                return AuthOutcome::TransportFailure;
            }
        };

        let status = response.status();
        if status.is_success() {
            return AuthOutcome::Success;
        }

        debug!("Login answered with {}", status);
        // A rejection must carry a JSON body; anything else counts as a broken response
        match response.json::<ErrorBody>().await {
            Ok(body) => AuthOutcome::Rejected(body.error),
            Err(e) => {
                warn!("Unreadable login error body ({}): {}", status, e);
                AuthOutcome::TransportFailure
            }
        }
    }

    async fn fetch_profile(&self) -> Result<AcademicRecord> {
        let record = self
            .client
            .get(self.url("/dashboard"))
            .query(&[("json", "1")])
            .send()
            .await?
            .error_for_status()?
            .json::<AcademicRecord>()
            .await?;
        Ok(record)
    }

    async fn logout(&self) -> Result<()> {
        self.client
            .post(self.url("/logout"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
