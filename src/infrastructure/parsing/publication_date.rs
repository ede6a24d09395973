//! Publication date normalization
//!
//! The status line reads like `Вакансія опублікована 12 травня 2023 <span>…`.
//! Month names are genitive Ukrainian and are mapped to English before the
//! date is parsed as `day month year`.

use super::{ParsingError, ParsingResult};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%d %B %Y";

/// Ukrainian genitive month name to English month name
const MONTHS: [(&str, &str); 12] = [
    ("січня", "January"),
    ("лютого", "February"),
    ("березня", "March"),
    ("квітня", "April"),
    ("травня", "May"),
    ("червня", "June"),
    ("липня", "July"),
    ("серпня", "August"),
    ("вересня", "September"),
    ("жовтня", "October"),
    ("листопада", "November"),
    ("грудня", "December"),
];

/// Replace every localized month name in `text` with its English equivalent.
pub fn translate_month_names(text: &str) -> String {
    MONTHS
        .iter()
        .fold(text.to_lowercase(), |acc, (local, english)| {
            acc.replace(local, english)
        })
}

/// Parse a localized `day month year` date such as `12 травня 2023`.
pub fn parse_localized_date(text: &str) -> ParsingResult<NaiveDate> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Err(ParsingError::date_parse_failed(text, "date text is empty"));
    }

    let translated = translate_month_names(&normalized);
    if translated.chars().any(|c| c.is_alphabetic() && !c.is_ascii()) {
        return Err(ParsingError::date_parse_failed(text, "unmapped month name"));
    }

    NaiveDate::parse_from_str(&translated, DATE_FORMAT)
        .map_err(|e| ParsingError::date_parse_failed(text, e))
}

/// Pull the publication date out of the status element's inner HTML.
///
/// Everything after `published_phrase` up to the next tag is the date text.
/// A status line without the phrase has no date: `Ok(None)`.
pub fn parse_publication_date(status_html: &str, published_phrase: &str) -> ParsingResult<Option<NaiveDate>> {
    // Serialized markup spells U+00A0 as an entity
    let status_html = status_html.replace("&nbsp;", " ").replace('\u{a0}', " ");

    let Some((_, after_phrase)) = status_html.split_once(published_phrase) else {
        return Ok(None);
    };

    let date_text = after_phrase
        .split_once('<')
        .map_or(after_phrase, |(before_markup, _)| before_markup);

    parse_localized_date(date_text).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PHRASE: &str = "Вакансія опублікована";

    #[rstest]
    #[case("12 травня 2023", 2023, 5, 12)]
    #[case("1 січня 2024", 2024, 1, 1)]
    #[case("28 лютого 2022", 2022, 2, 28)]
    #[case("  30   листопада\n 2021 ", 2021, 11, 30)]
    #[case("31 грудня 2020", 2020, 12, 31)]
    fn test_parse_localized_date(#[case] input: &str, #[case] year: i32, #[case] month: u32, #[case] day: u32) {
        let date = parse_localized_date(input).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(year, month, day).unwrap());
    }

    #[rstest]
    #[case("12 травень 2023")]
    #[case("12 foo 2023")]
    #[case("травня 2023")]
    #[case("")]
    #[case("31 лютого 2023")]
    fn test_parse_localized_date_failures(#[case] input: &str) {
        let error = parse_localized_date(input).unwrap_err();
        assert!(matches!(error, ParsingError::DateParseFailed { .. }));
    }

    #[test]
    fn test_every_month_is_mapped() {
        for (month_index, (local, _)) in MONTHS.iter().enumerate() {
            let date = parse_localized_date(&format!("15 {local} 2023")).unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2023, month_index as u32 + 1, 15).unwrap());
        }
    }

    #[test]
    fn test_parse_publication_date_strips_trailing_markup() {
        let html = "\n  Вакансія опублікована 12 травня 2023\n  <span class=\"mx-1\">·</span> 45 переглядів <span>·</span> 7 відгуків";
        assert_eq!(
            parse_publication_date(html, PHRASE).unwrap(),
            NaiveDate::from_ymd_opt(2023, 5, 12)
        );
    }

    #[test]
    fn test_parse_publication_date_without_markup() {
        assert_eq!(
            parse_publication_date("Вакансія опублікована 3 вересня 2023", PHRASE).unwrap(),
            NaiveDate::from_ymd_opt(2023, 9, 3)
        );
    }

    #[rstest]
    #[case("Вакансія опублікована 12&nbsp;травня&nbsp;2023")]
    #[case("Вакансія&nbsp;опублікована&nbsp;12 травня 2023 <span>·</span>")]
    #[case("Вакансія опублікована 12\u{a0}травня\u{a0}2023")]
    fn test_parse_publication_date_non_breaking_spaces(#[case] html: &str) {
        assert_eq!(
            parse_publication_date(html, PHRASE).unwrap(),
            NaiveDate::from_ymd_opt(2023, 5, 12)
        );
    }

    #[test]
    fn test_parse_publication_date_missing_phrase_is_absent() {
        assert_eq!(parse_publication_date("12 травня 2023", PHRASE).unwrap(), None);
    }

    #[test]
    fn test_parse_publication_date_bad_format_is_an_error() {
        let error = parse_publication_date("Вакансія опублікована 12 foo 2023", PHRASE).unwrap_err();
        assert!(matches!(error, ParsingError::DateParseFailed { .. }));
    }
}
