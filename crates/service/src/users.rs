//! Owner profiles live in the users service; this module is the client side
//! of that boundary and the contract for forwarding its answers.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::UserId;
use crate::errors::ServiceError;

/// Which representation of a profile to ask the users service for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileView {
    Full,
    Mini,
}

/// What the users service answered, captured before any forwarding decision.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteProfile {
    pub status: u16,
    /// `None` when the body was not JSON.
    pub body: Option<serde_json::Value>,
}

/// A users-service response this service passes on verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardedResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ForwardedResponse {
    /// Forwarding contract: only a 2xx answer with a JSON body is passed through
    /// as-is. Anything else is a dependency failure, so no partial owner data
    /// ever reaches the client.
    pub fn from_remote(remote: RemoteProfile) -> Result<Self, ServiceError> {
        if !(200..300).contains(&remote.status) {
            return Err(ServiceError::Dependency(format!("users service answered {}", remote.status)));
        }
        match remote.body {
            Some(body) => Ok(Self { status: remote.status, body }),
            None => Err(ServiceError::Dependency("users service body is not json".into())),
        }
    }
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Transport failures are `ServiceError::Dependency`; every answered
    /// request, whatever its status, is `Ok`.
    async fn fetch_profile(&self, user_id: UserId, view: ProfileView) -> Result<RemoteProfile, ServiceError>;
}

/// `UserDirectory` over HTTP: `GET {base_url}/users/{id}[/mini]`.
///
/// One reqwest client is reused for every call; no retry and no timeout
/// beyond reqwest's defaults.
#[derive(Clone)]
pub struct HttpUserDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_profile(&self, user_id: UserId, view: ProfileView) -> Result<RemoteProfile, ServiceError> {
        let mini = view == ProfileView::Mini;
        let resp = common::users::fetch_user(&self.client, &self.base_url, user_id, mini)
            .await
            .map_err(|e| ServiceError::Dependency(e.to_string()))?;
        debug!(status = resp.status, "users service answered");
        Ok(RemoteProfile { status: resp.status, body: resp.body })
    }
}
