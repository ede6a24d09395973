use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One extracted vacancy, produced once per detail page and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Absolute detail page URL; the only stable identity a record has
    pub url: String,
    pub title: String,
    pub company: Option<String>,
    /// Raw salary text, range and currency left unparsed
    pub salary: Option<String>,
    pub english_level: Option<String>,
    pub experience_year: Option<u32>,
    pub domen: Option<String>,
    pub work_type: Option<String>,
    pub company_type: Option<String>,
    /// `Some(1)` when the vacancy advertises a take-home test, otherwise `None`
    pub test_available: Option<u8>,
    pub views: u32,
    pub applications: u32,
    pub publication_date: Option<NaiveDate>,
    /// Vocabulary order, no duplicates
    pub technologies: Vec<String>,
}

impl ListingRecord {
    /// A record with only the required fields set and every optional field at its default.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            company: None,
            salary: None,
            english_level: None,
            experience_year: None,
            domen: None,
            work_type: None,
            company_type: None,
            test_available: None,
            views: 0,
            applications: 0,
            publication_date: None,
            technologies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = ListingRecord::new("https://djinni.co/jobs/1-python/", "Python Developer");

        assert_eq!(record.title, "Python Developer");
        assert!(record.company.is_none());
        assert!(record.publication_date.is_none());
        assert_eq!(record.views, 0);
        assert_eq!(record.applications, 0);
        assert!(record.technologies.is_empty());
    }

    #[test]
    fn test_record_serializes_date_as_calendar_day() {
        let mut record = ListingRecord::new("https://djinni.co/jobs/1/", "Backend Engineer");
        record.publication_date = NaiveDate::from_ymd_opt(2023, 5, 12);
        record.test_available = Some(1);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["publication_date"], "2023-05-12");
        assert_eq!(json["test_available"], 1);
        assert_eq!(json["domen"], serde_json::Value::Null);
    }
}
