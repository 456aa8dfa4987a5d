//! Write side: creating and deleting issues under a roadmap.

pub mod payload;
pub mod service;

pub use payload::{parse_issue_payload, IssuePayload};
pub use service::{DeleteAck, IssueCreated, IssueService};
