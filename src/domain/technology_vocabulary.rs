//! Technology vocabulary used to tag vacancies
//!
//! The vocabulary is plain data: one technology name per line, blank lines and
//! `#` comments ignored. A default list ships with the crate in
//! `config/technologies.txt` and can be replaced at runtime.

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_VOCABULARY: &str = include_str!("../../config/technologies.txt");

/// Ordered, case-insensitively unique list of technology names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologyVocabulary {
    /// (display name, lowercase needle)
    entries: Vec<(String, String)>,
}

impl TechnologyVocabulary {
    /// Build a vocabulary from names, keeping the first spelling of case-insensitive duplicates.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let needle = name.to_lowercase();
            if entries.iter().any(|(_, existing)| *existing == needle) {
                debug!("Ignoring duplicate vocabulary entry '{}'", name);
                continue;
            }
            entries.push((name.to_string(), needle));
        }
        Self { entries }
    }

    /// Parse the line-oriented vocabulary format.
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read technology vocabulary: {}", path.display()))?;
        let vocabulary = Self::parse(&content);
        info!(
            "Loaded {} technologies from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Every vocabulary entry occurring anywhere in `text`, case-insensitively, in vocabulary order.
    ///
    /// Plain substring matching: "Java" is found inside "JavaScript".
    pub fn find_in(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, needle)| haystack.contains(needle.as_str()))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Default for TechnologyVocabulary {
    fn default() -> Self {
        Self::parse(BUNDLED_VOCABULARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    #[test]
    fn test_bundled_vocabulary_is_not_empty() {
        let vocabulary = TechnologyVocabulary::default();
        assert!(!vocabulary.is_empty());
        assert!(vocabulary.names().any(|name| name == "Python"));
    }

    #[test]
    fn test_matches_follow_vocabulary_order() {
        let vocabulary = TechnologyVocabulary::new(["Python", "Django", "Docker"]);
        let found = vocabulary.find_in("We use docker, DJANGO and a bit of python.");
        assert_eq!(found, vec!["Python", "Django", "Docker"]);
    }

    #[test]
    fn test_java_matches_inside_javascript() {
        let vocabulary = TechnologyVocabulary::new(["Java", "JavaScript"]);
        let found = vocabulary.find_in("Frontend work in JavaScript only");
        assert_eq!(found, vec!["Java", "JavaScript"]);
    }

    #[test]
    fn test_duplicates_are_dropped_case_insensitively() {
        let vocabulary = TechnologyVocabulary::new(["AWS", "aws", " AWS ", "", "GCP"]);
        assert_eq!(vocabulary.names().collect::<Vec<_>>(), vec!["AWS", "GCP"]);
        assert_eq!(vocabulary.find_in("aws and gcp"), vec!["AWS", "GCP"]);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let vocabulary = TechnologyVocabulary::parse("# languages\nPython\n\n  Go  \n# infra\nDocker\n");
        assert_eq!(vocabulary.names().collect::<Vec<_>>(), vec!["Python", "Go", "Docker"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "FastAPI\nCelery\nRedis").unwrap();

        let vocabulary = TechnologyVocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.find_in("celery + redis"), vec!["Celery", "Redis"]);
    }

    #[test]
    fn test_from_missing_file_fails() {
        let result = TechnologyVocabulary::from_file(Path::new("/definitely/not/here.txt"));
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_output_order_ignores_text_order(order in Just(vec!["Redis", "Kafka", "Python", "SQL"]).prop_shuffle()) {
            let vocabulary = TechnologyVocabulary::new(["Python", "SQL", "Kafka", "Redis"]);
            let text = order.join(" ");
            prop_assert_eq!(vocabulary.find_in(&text), vec!["Python", "SQL", "Kafka", "Redis"]);
        }
    }
}
