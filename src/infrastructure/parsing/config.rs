//! Parsing configuration for vacancy pages
//!
//! Centralized CSS selectors, text markers and icon rules. Defaults follow the
//! djinni.co markup in its Ukrainian locale.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Listing index (search result) page selectors
    pub listing_index_selectors: ListingIndexSelectors,

    /// Listing detail page selectors
    pub listing_detail_selectors: ListingDetailSelectors,

    /// Localized labels and phrases the extractors look for
    pub markers: ListingMarkers,

    /// Icon class to field mapping for the additional info block.
    /// Evaluated in order; the first rule whose class fragment matches an item applies.
    pub additional_info_rules: Vec<AdditionalInfoRule>,

    /// Technology vocabulary file; the bundled list is used when unset
    pub technologies_path: Option<PathBuf>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            listing_index_selectors: ListingIndexSelectors::default(),
            listing_detail_selectors: ListingDetailSelectors::default(),
            markers: ListingMarkers::default(),
            additional_info_rules: vec![
                AdditionalInfoRule::new("bi bi-building", InfoField::WorkType),
                AdditionalInfoRule::new("bi bi-house-door", InfoField::WorkType),
                AdditionalInfoRule::new("bi bi-basket3-fill", InfoField::CompanyType),
                AdditionalInfoRule::new("bi bi-exclude", InfoField::CompanyType),
            ],
            technologies_path: None,
        }
    }
}

/// CSS selectors for listing index pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingIndexSelectors {
    /// Links to listing detail pages
    pub listing_link: String,

    /// Trailing pagination link
    pub next_page_link: String,
}

impl Default for ListingIndexSelectors {
    fn default() -> Self {
        Self {
            listing_link: ".job-list-item__link".to_string(),
            next_page_link: ".pagination li:last-child a".to_string(),
        }
    }
}

/// CSS selectors for listing detail pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingDetailSelectors {
    pub title: String,
    pub company: String,
    pub salary: String,

    /// Elements whose own text carries "Label: value" pairs
    pub label_container: String,

    /// The experience line (last entry of the info block)
    pub experience: String,

    pub additional_info_item: String,
    pub additional_info_icon: String,
    pub additional_info_text: String,

    /// Status line holding publication date and response count
    pub status: String,

    /// Vacancy description scanned for technologies
    pub description: String,
}

impl Default for ListingDetailSelectors {
    fn default() -> Self {
        Self {
            title: "h1".to_string(),
            company: ".job-details--title".to_string(),
            salary: ".public-salary-item".to_string(),
            label_container: "div".to_string(),
            experience: ".job-additional-info--body li:last-child div".to_string(),
            additional_info_item: "li.job-additional-info--item".to_string(),
            additional_info_icon: "span".to_string(),
            additional_info_text: "div.job-additional-info--item-text".to_string(),
            status: "p.text-muted".to_string(),
            description: ".job-post-description".to_string(),
        }
    }
}

/// Localized text markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingMarkers {
    /// "English level:"
    pub english_level_label: String,

    /// "Domain:"
    pub domain_label: String,

    /// Separator between a label and its value
    pub label_separator: String,

    /// First token of the experience line meaning "no experience"
    pub no_experience_token: String,

    /// Icon class of the take-home test item
    pub test_icon_class: String,

    /// Exact item text meaning "Has a take-home test"
    pub test_phrase: String,

    /// Word stem following the response count ("responses")
    pub responses_word: String,

    /// Phrase preceding the publication date ("Vacancy published on")
    pub published_phrase: String,
}

impl Default for ListingMarkers {
    fn default() -> Self {
        Self {
            english_level_label: "Англійська:".to_string(),
            domain_label: "Домен:".to_string(),
            label_separator: ": ".to_string(),
            no_experience_token: "Без".to_string(),
            test_icon_class: "bi bi-pencil-square".to_string(),
            test_phrase: "Є тестове завдання".to_string(),
            responses_word: "відгук".to_string(),
            published_phrase: "Вакансія опублікована".to_string(),
        }
    }
}

/// Record field an additional info item can populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoField {
    WorkType,
    CompanyType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInfoRule {
    /// Substring of the item's icon `class` attribute
    pub icon_class: String,
    pub field: InfoField,
}

impl AdditionalInfoRule {
    pub fn new(icon_class: &str, field: InfoField) -> Self {
        Self {
            icon_class: icon_class.to_string(),
            field,
        }
    }
}
