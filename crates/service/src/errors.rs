use thiserror::Error;

/// Failure taxonomy shared by all roadmap and issue operations.
///
/// The `String` payloads of the client-facing variants are the exact messages
/// returned in `{"error": ...}` bodies.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("authentication required")]
    Unauthenticated,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("dependency failure: {0}")]
    Dependency(String),
    #[error("{0}")]
    Persistence(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(msg: &str) -> Self { Self::NotFound(msg.to_string()) }
    pub fn invalid(msg: &str) -> Self { Self::InvalidArgument(msg.to_string()) }

    /// HTTP status the error surfaces as.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidArgument(_) => 400,
            ServiceError::Unauthenticated => 401,
            ServiceError::Forbidden(_) => 403,
            ServiceError::NotFound(_) => 404,
            ServiceError::Dependency(_)
            | ServiceError::Persistence(_)
            | ServiceError::Db(_)
            | ServiceError::Internal(_) => 500,
        }
    }

    /// Message safe to hand to clients. Dependency and storage details stay in logs.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Unauthenticated => "Authentication required.".to_string(),
            ServiceError::Dependency(_) | ServiceError::Db(_) | ServiceError::Internal(_) => {
                "An error occurred.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool { self.status_code() >= 500 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(ServiceError::invalid("x").status_code(), 400);
        assert_eq!(ServiceError::Unauthenticated.status_code(), 401);
        assert_eq!(ServiceError::Forbidden("x".into()).status_code(), 403);
        assert_eq!(ServiceError::not_found("x").status_code(), 404);
        assert_eq!(ServiceError::Dependency("x".into()).status_code(), 500);
        assert_eq!(ServiceError::Persistence("x".into()).status_code(), 500);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn internal_details_are_not_public() {
        let e = ServiceError::Dependency("connect refused 10.0.0.7:8080".into());
        assert_eq!(e.public_message(), "An error occurred.");
        let e = ServiceError::Db("relation \"issue\" does not exist".into());
        assert_eq!(e.public_message(), "An error occurred.");
        let e = ServiceError::Internal("token error: InvalidKeyFormat".into());
        assert_eq!(e.public_message(), "An error occurred.");
        let e = ServiceError::not_found("Roadmap does not exist.");
        assert_eq!(e.public_message(), "Roadmap does not exist.");
    }
}
