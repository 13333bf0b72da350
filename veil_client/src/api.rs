use std::{
    future::Future,
    sync::{Arc, LazyLock},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::form::ContactFormData;

const CONTACT_ROUTE: &str = "api/contact";

static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let version = env!("CARGO_PKG_VERSION");

    format!("VeilStudio Contact Client ({homepage}, Version {version})")
});

#[cfg_attr(test, mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Submit the form data with a single request.
    ///
    /// Any response the server sends back is `Ok`, whatever its status.
    fn submit(
        &self,
        data: ContactFormData,
    ) -> impl Future<Output = Result<ContactApiResponse, ContactApiError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactApiResponse {
    /// Whether the server answered with a 2xx status.
    pub success: bool,
    /// The `message` of the response body, if it could be read.
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContactApiError {
    /// No response has been received.
    #[error("Failed to reach the contact endpoint: {0:#}")]
    Network(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    endpoint: Arc<Url>,
    client: reqwest::Client,
}

impl ContactClient {
    /// Create a client for the site hosted at `base_url`.
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()?;

        Ok(Self {
            endpoint: base_url.join(CONTACT_ROUTE)?.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ContactApi for ContactClient {
    async fn submit(&self, data: ContactFormData) -> Result<ContactApiResponse, ContactApiError> {
        let response = self
            .client
            .post((*self.endpoint).clone())
            .json(&data)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        let status = response.status();
        debug!(%status, "contact endpoint responded");

        let message = response
            .json::<ResponseBody>()
            .await
            .inspect_err(|err| debug!("failed to read response body: {err}"))
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty());

        Ok(ContactApiResponse {
            success: status.is_success(),
            message,
        })
    }
}

#[derive(Deserialize)]
struct ResponseBody {
    message: Option<String>,
}

#[cfg(test)]
impl MockContactApi {
    pub fn with_submit(
        mut self,
        data: ContactFormData,
        result: Result<ContactApiResponse, ContactApiError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(data))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
