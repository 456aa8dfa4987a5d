use thiserror::Error;

pub mod types;
pub mod utils;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),
}

/// HTTP client for the separately deployed users service.
pub mod users {
    use super::*;

    /// Raw outcome of a users-service call: status and (if it was JSON) body.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RemoteResponse {
        pub status: u16,
        pub body: Option<serde_json::Value>,
    }

    /// `{base}/users/{id}` or `{base}/users/{id}/mini`.
    pub fn profile_url(base_url: &str, user_id: i64, mini: bool) -> String {
        let base = base_url.trim_end_matches('/');
        if mini {
            format!("{base}/users/{user_id}/mini")
        } else {
            format!("{base}/users/{user_id}")
        }
    }

    /// Fetch a user profile. Only transport failures are errors; any status
    /// code the remote answers with is returned to the caller.
    pub async fn fetch_user(
        client: &reqwest::Client,
        base_url: &str,
        user_id: i64,
        mini: bool,
    ) -> Result<RemoteResponse, CoreError> {
        let url = profile_url(base_url, user_id, mini);
        let resp = client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let body = match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(%url, status, err = %e, "users service body is not json");
                None
            }
        };
        Ok(RemoteResponse { status, body })
    }
}
