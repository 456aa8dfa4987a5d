//! Read side: roadmap views, tag names and owner profiles.

pub mod views;
pub mod service;

pub use service::RoadmapService;
pub use views::{RoadmapMiniView, RoadmapView, TagsView};
