//! Listing detail parser
//!
//! Runs one extractor per record field over a vacancy page. Only the title is
//! required; every other extractor resolves a missing element to its
//! null/default value instead of failing the record.

#![allow(clippy::uninlined_format_args)]

use super::config::{InfoField, ListingDetailSelectors, ListingMarkers};
use super::context::DetailParseContext;
use super::publication_date::parse_publication_date;
use super::{compile_selector, ContextualParser, ParsingConfig, ParsingError, ParsingResult};
use crate::domain::{ListingRecord, TechnologyVocabulary};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Fields read from the additional info block
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct AdditionalInfo {
    work_type: Option<String>,
    company_type: Option<String>,
    test_available: Option<u8>,
}

/// Compiled additional info rule
struct InfoRule {
    icon_class: String,
    field: InfoField,
}

/// Parser for extracting vacancy fields from listing detail pages
pub struct ListingDetailParser {
    body_content_selector: Selector,
    title_selector: Selector,
    company_selector: Selector,
    salary_selector: Selector,
    label_container_selector: Selector,
    experience_selector: Selector,
    info_item_selector: Selector,
    info_icon_selector: Selector,
    info_text_selector: Selector,
    status_selector: Selector,
    description_selector: Selector,

    info_rules: Vec<InfoRule>,
    markers: ListingMarkers,
    responses_pattern: Regex,
    vocabulary: TechnologyVocabulary,
}

impl ListingDetailParser {
    /// Create a parser with default selectors and the bundled technology vocabulary
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ParsingConfig::default(), TechnologyVocabulary::default())
    }

    /// Create parser with custom configuration and vocabulary
    pub fn with_config(config: &ParsingConfig, vocabulary: TechnologyVocabulary) -> ParsingResult<Self> {
        let selectors: &ListingDetailSelectors = &config.listing_detail_selectors;
        let markers = config.markers.clone();

        let responses_pattern = Regex::new(&format!(
            r"(\d+)\s*{}",
            regex::escape(&markers.responses_word)
        ))
        .map_err(|e| ParsingError::InvalidPattern {
            field: "responses_word".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            body_content_selector: compile_selector("body *")?,
            title_selector: compile_selector(&selectors.title)?,
            company_selector: compile_selector(&selectors.company)?,
            salary_selector: compile_selector(&selectors.salary)?,
            label_container_selector: compile_selector(&selectors.label_container)?,
            experience_selector: compile_selector(&selectors.experience)?,
            info_item_selector: compile_selector(&selectors.additional_info_item)?,
            info_icon_selector: compile_selector(&selectors.additional_info_icon)?,
            info_text_selector: compile_selector(&selectors.additional_info_text)?,
            status_selector: compile_selector(&selectors.status)?,
            description_selector: compile_selector(&selectors.description)?,
            info_rules: config
                .additional_info_rules
                .iter()
                .map(|rule| InfoRule {
                    icon_class: rule.icon_class.clone(),
                    field: rule.field,
                })
                .collect(),
            markers,
            responses_pattern,
            vocabulary,
        })
    }
}

impl ContextualParser for ListingDetailParser {
    type Output = ListingRecord;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing listing detail from: {}", context.url);

        if html.select(&self.body_content_selector).next().is_none() {
            return Err(ParsingError::malformed_document(
                "document body has no content",
                Some(context.url.as_str()),
            ));
        }

        let title = self
            .extract_text(html, &self.title_selector, "title")
            .ok_or_else(|| ParsingError::required_field_missing("title", Some(context.url.as_str())))?;

        let status = html.select(&self.status_selector).next();
        if status.is_none() {
            debug!("No status line on {}", context.url);
        }
        // Views and applications come from the same number; the page exposes no separate view count
        let responses = self.extract_response_count(status);
        let info = self.extract_additional_info(html);

        let record = ListingRecord {
            url: context.url.to_string(),
            title,
            company: self.extract_text(html, &self.company_selector, "company"),
            salary: self.extract_text(html, &self.salary_selector, "salary"),
            english_level: self.extract_labeled_value(html, &self.markers.english_level_label),
            experience_year: self.extract_experience_year(html),
            domen: self.extract_labeled_value(html, &self.markers.domain_label),
            work_type: info.work_type,
            company_type: info.company_type,
            test_available: info.test_available,
            views: responses,
            applications: responses,
            publication_date: status.and_then(|element| self.extract_publication_date(element, &context.url)),
            technologies: self.extract_technologies(html),
        };

        debug!(
            "Extracted '{}' ({} technologies) from page {:?} index {:?}",
            record.title,
            record.technologies.len(),
            context.source_page_id,
            context.source_index
        );
        Ok(record)
    }
}

impl ListingDetailParser {
    /// Trimmed text of the first matching element
    fn extract_text(&self, html: &Html, selector: &Selector, field_name: &str) -> Option<String> {
        let text = html
            .select(selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty());

        if text.is_none() {
            debug!("Field '{}' not present", field_name);
        }
        text
    }

    /// Value part of the first "Label: value" text node containing `label`
    fn extract_labeled_value(&self, html: &Html, label: &str) -> Option<String> {
        let labeled_text = html.select(&self.label_container_selector).find_map(|element| {
            element
                .children()
                .filter_map(|node| node.value().as_text())
                .map(|text| &**text)
                .find(|text| text.contains(label))
        });

        let Some(labeled_text) = labeled_text else {
            debug!("Label '{}' not present", label);
            return None;
        };

        labeled_text
            .trim()
            .split(self.markers.label_separator.as_str())
            .nth(1)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    }

    /// Years of experience from the last line of the info block
    fn extract_experience_year(&self, html: &Html) -> Option<u32> {
        let Some(element) = html.select(&self.experience_selector).next() else {
            debug!("Experience block not present");
            return None;
        };

        let text = element.text().collect::<String>();
        let token = text.split_whitespace().next()?;

        if token == self.markers.no_experience_token {
            return Some(0);
        }

        match token.parse::<u32>() {
            Ok(years) => Some(years),
            Err(e) => {
                debug!("Experience token '{}' is not a number: {}", token, e);
                None
            }
        }
    }

    /// Classify additional info items by icon class; later items overwrite earlier ones
    fn extract_additional_info(&self, html: &Html) -> AdditionalInfo {
        let mut info = AdditionalInfo::default();

        for item in html.select(&self.info_item_selector) {
            let Some(icon_class) = item
                .select(&self.info_icon_selector)
                .next()
                .and_then(|icon| icon.value().attr("class"))
            else {
                continue;
            };

            let text = item
                .select(&self.info_text_selector)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty());

            if let Some(rule) = self
                .info_rules
                .iter()
                .find(|rule| icon_class.contains(rule.icon_class.as_str()))
            {
                match rule.field {
                    InfoField::WorkType => info.work_type = text,
                    InfoField::CompanyType => info.company_type = text,
                }
            } else if icon_class.contains(self.markers.test_icon_class.as_str())
                && text.as_deref() == Some(self.markers.test_phrase.as_str())
            {
                info.test_available = Some(1);
            }
        }

        info
    }

    /// Response count from the status line, 0 when absent
    fn extract_response_count(&self, status: Option<ElementRef<'_>>) -> u32 {
        let Some(status) = status else {
            return 0;
        };
        let text = status.text().collect::<String>();

        self.responses_pattern
            .captures(&text)
            .and_then(|captures| captures.get(1))
            .and_then(|count| count.as_str().parse().ok())
            .unwrap_or(0)
    }

    fn extract_publication_date(&self, status: ElementRef<'_>, url: &Url) -> Option<NaiveDate> {
        match parse_publication_date(&status.inner_html(), &self.markers.published_phrase) {
            Ok(Some(date)) => Some(date),
            Ok(None) => {
                debug!("No publication phrase in status line of {}", url);
                None
            }
            Err(e) => {
                warn!("Publication date dropped for {}: {}", url, e);
                None
            }
        }
    }

    /// Vocabulary entries mentioned anywhere in the description
    fn extract_technologies(&self, html: &Html) -> Vec<String> {
        // Plain concatenation keeps terms split by inline markup intact
        let description: String = html
            .select(&self.description_selector)
            .flat_map(|element| element.text())
            .collect();

        if description.trim().is_empty() {
            debug!("Description not present");
            return Vec::new();
        }
        self.vocabulary.find_in(&description)
    }
}
