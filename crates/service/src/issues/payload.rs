//! Parsing of client-supplied issue data.
//!
//! The request body is `{"issue": ...}` where `issue` is either a
//! JSON-encoded string or an inline object. Identity fields in the payload
//! (`id`, `userId`, `roadmapId`) are accepted but never trusted.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{CallerIdentity, Issue, RoadmapId, UNASSIGNED_ID};
use crate::errors::ServiceError;

pub const INVALID_ISSUE: &str = "Issue data is invalid.";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    issue: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePayload {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub roadmap_id: Option<Value>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default = "default_open")]
    pub open: bool,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub updated_at: Option<Value>,
}

fn default_open() -> bool { true }

fn invalid() -> ServiceError { ServiceError::invalid(INVALID_ISSUE) }

/// Parse a raw request body into an issue payload.
pub fn parse_issue_payload(raw: &[u8]) -> Result<IssuePayload, ServiceError> {
    let envelope: Envelope = serde_json::from_slice(raw).map_err(|_| invalid())?;
    let payload: IssuePayload = match envelope.issue {
        Some(Value::String(encoded)) => serde_json::from_str(&encoded).map_err(|_| invalid())?,
        Some(obj @ Value::Object(_)) => serde_json::from_value(obj).map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    models::issue::validate_title(&payload.title).map_err(|_| invalid())?;
    Ok(payload)
}

/// Years a Postgres `timestamptz` can hold (4713 BC is year -4712 here).
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = -4712..=294_276;

/// Read a client timestamp: RFC 3339 strings and epoch milliseconds are
/// accepted and normalized to UTC. Anything else, including absence or a
/// date the database cannot store, is `now`.
pub fn normalize_timestamp(value: Option<&Value>, now: DateTime<Utc>) -> DateTime<Utc> {
    let parsed = match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim()).ok().map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    parsed.filter(|dt| STORABLE_YEARS.contains(&dt.year())).unwrap_or(now)
}

impl IssuePayload {
    /// Build the unsaved issue: id is the unassigned sentinel, the creator is
    /// the caller, and the roadmap is the one addressed by the request.
    pub fn into_issue(self, roadmap_id: RoadmapId, caller: &CallerIdentity, now: DateTime<Utc>) -> Issue {
        Issue {
            id: UNASSIGNED_ID,
            roadmap_id,
            user_id: caller.user_id,
            open: self.open,
            title: self.title,
            content: self.content,
            created_at: normalize_timestamp(self.created_at.as_ref(), now),
            updated_at: normalize_timestamp(self.updated_at.as_ref(), now),
        }
    }
}
