//! Domain module - vacancy entities and value objects
//!
//! Everything here is plain data: the extracted record, the discovered
//! detail URL, and the technology vocabulary used to tag records.

pub mod listing;
pub mod listing_url;
pub mod technology_vocabulary;

pub use listing::ListingRecord;
pub use listing_url::{ListingIndexPage, ListingUrl};
pub use technology_vocabulary::TechnologyVocabulary;
