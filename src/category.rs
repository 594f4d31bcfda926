use crate::HyclassError;

/// Ordered, de-duplicated list of category labels.
///
/// Order matters: rule-scorer ties and the no-signal default both resolve
/// to the earliest matching entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryList {
    labels: Vec<String>,
}

impl CategoryList {
    /// Parse a comma-separated configuration string ("positive, negative, neutral").
    ///
    /// Entries are trimmed; blank entries and exact duplicates are dropped.
    /// At least one label must remain.
    pub fn parse(raw: &str) -> Result<Self, HyclassError> {
        let mut labels: Vec<String> = Vec::new();
        for part in raw.split(',') {
            let label = part.trim();
            if label.is_empty() || labels.iter().any(|l| l == label) {
                continue;
            }
            labels.push(label.to_string());
        }
        if labels.is_empty() {
            return Err(HyclassError::Category(format!(
                "no categories in {raw:?}"
            )));
        }
        Ok(Self { labels })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn first(&self) -> &str {
        // parse() guarantees at least one entry
        &self.labels[0]
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Case-insensitive lookup returning the list's own spelling.
    pub fn find_ignore_case(&self, label: &str) -> Option<&str> {
        let wanted = label.trim().to_lowercase();
        self.labels
            .iter()
            .find(|l| l.to_lowercase() == wanted)
            .map(String::as_str)
    }

    /// Comma-joined form used in remote prompts.
    pub fn joined(&self) -> String {
        self.labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_entries() {
        let cats = CategoryList::parse(" positive ,negative,  neutral").unwrap();
        assert_eq!(cats.iter().collect::<Vec<_>>(), ["positive", "negative", "neutral"]);
    }

    #[test]
    fn parse_drops_blank_and_duplicate_entries() {
        let cats = CategoryList::parse("spam,, ham ,spam").unwrap();
        assert_eq!(cats.iter().collect::<Vec<_>>(), ["spam", "ham"]);
    }

    #[test]
    fn parse_rejects_empty_list() {
        assert!(matches!(
            CategoryList::parse(" , ,"),
            Err(HyclassError::Category(_))
        ));
        assert!(CategoryList::parse("").is_err());
    }

    #[test]
    fn case_sensitive_contains_but_insensitive_find() {
        let cats = CategoryList::parse("Positive, Negative").unwrap();
        assert!(!cats.contains("positive"));
        assert_eq!(cats.find_ignore_case("POSITIVE"), Some("Positive"));
        assert_eq!(cats.find_ignore_case("neutral"), None);
    }

    #[test]
    fn joined_preserves_order() {
        let cats = CategoryList::parse("b, a, c").unwrap();
        assert_eq!(cats.joined(), "b, a, c");
        assert_eq!(cats.first(), "b");
    }
}
