//! SeaORM entities for the roadmap service plus connection helpers.

pub mod errors;
pub mod db;
pub mod roadmap;
pub mod roadmap_tag;
pub mod issue;

#[cfg(test)]
mod tests;
