use std::collections::HashMap;

/// Lookup from abbreviated part-of-speech codes to display labels.
///
/// Codes without a mapping are shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosLabels {
    labels: HashMap<String, String>,
}

impl Default for PosLabels {
    fn default() -> Self {
        Self::empty()
            .with_label("n", "noun")
            .with_label("v", "verb")
            .with_label("adj", "adjective")
            .with_label("adv", "adverb")
    }
}

impl PosLabels {
    /// A mapping with no entries; every code passes through unchanged.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    /// Adds or replaces the label for `code`.
    #[must_use]
    pub fn with_label(mut self, code: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(code.into(), label.into());
        self
    }

    #[must_use]
    pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
        self.labels.get(code).map_or(code, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_maps_common_codes() {
        let labels = PosLabels::default();
        assert_eq!(labels.label("n"), "noun");
        assert_eq!(labels.label("v"), "verb");
        assert_eq!(labels.label("adj"), "adjective");
        assert_eq!(labels.label("adv"), "adverb");
    }

    #[test]
    fn unknown_code_passes_through() {
        assert_eq!(PosLabels::default().label("prep"), "prep");
        assert_eq!(PosLabels::empty().label("n"), "n");
    }

    #[test]
    fn extension_adds_and_overrides() {
        let labels = PosLabels::default()
            .with_label("prep", "preposition")
            .with_label("n", "noun (countable)");
        assert_eq!(labels.label("prep"), "preposition");
        assert_eq!(labels.label("n"), "noun (countable)");
    }
}
