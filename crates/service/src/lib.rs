//! Service layer for roadmap reads and issue mutations.
//! - Storage is reached only through the `RoadmapStore` trait.
//! - Ownership lives in the users service; owner profiles are proxied, never copied.
//! - Every operation returns a typed `ServiceError` the HTTP layer maps to a status.

pub mod errors;
pub mod domain;
pub mod validation;
pub mod store;
pub mod users;
pub mod session;
pub mod roadmaps;
pub mod issues;
#[cfg(test)]
pub mod test_support;

pub use issues::IssueService;
pub use roadmaps::RoadmapService;
