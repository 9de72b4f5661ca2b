use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no catalog sections configured")]
    NoSections,
    #[error("unknown catalog section: {0}")]
    UnknownSection(String),
}

/// One tracked catalog feed. Sections are unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSection {
    pub name: String,
    pub url: String,
}

/// Immutable, ordered list of tracked sections. The first entry is the
/// default section when a caller names none.
#[derive(Debug, Clone)]
pub struct SectionList {
    sections: Vec<CatalogSection>,
}

impl SectionList {
    pub fn new(sections: Vec<CatalogSection>) -> Self {
        Self { sections }
    }

    /// Load a section list from a YAML file: a sequence of `{name, url}`
    /// mappings.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let sections: Vec<CatalogSection> = serde_yaml::from_str(&content)?;
        Ok(Self { sections })
    }

    /// The Celestrak element feeds tracked by default.
    pub fn celestrak() -> Self {
        let sections = [
            ("Weather", "http://celestrak.com/norad/elements/weather.txt"),
            ("NOAA", "http://celestrak.com/norad/elements/noaa.txt"),
            ("GOES", "http://celestrak.com/norad/elements/goes.txt"),
            (
                "Earth resources",
                "http://celestrak.com/norad/elements/resource.txt",
            ),
            (
                "Amateur radio",
                "http://celestrak.com/norad/elements/amateur.txt",
            ),
            ("CubeSats", "http://celestrak.com/norad/elements/cubesat.txt"),
        ]
        .into_iter()
        .map(|(name, url)| CatalogSection {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect();
        Self { sections }
    }

    pub fn sections(&self) -> &[CatalogSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CatalogSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn default_section(&self) -> Option<&CatalogSection> {
        self.sections.first()
    }

    /// Resolve a requested section: the explicit name if given, else the
    /// default. Never guesses beyond that.
    pub fn resolve(&self, name: Option<&str>) -> Result<&CatalogSection, ConfigError> {
        match name {
            Some(name) => self
                .find(name)
                .ok_or_else(|| ConfigError::UnknownSection(name.to_string())),
            None => self.default_section().ok_or(ConfigError::NoSections),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> SectionList {
        SectionList::new(vec![
            CatalogSection {
                name: "Weather".to_string(),
                url: "http://example.com/weather.txt".to_string(),
            },
            CatalogSection {
                name: "NOAA".to_string(),
                url: "http://example.com/noaa.txt".to_string(),
            },
        ])
    }

    #[test]
    fn resolves_explicit_name() {
        let list = sample();
        assert_eq!(list.resolve(Some("NOAA")).unwrap().name, "NOAA");
    }

    #[test]
    fn resolves_default_to_first_entry() {
        let list = sample();
        assert_eq!(list.resolve(None).unwrap().name, "Weather");
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = sample().resolve(Some("Starlink")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSection(ref n) if n == "Starlink"));
    }

    #[test]
    fn empty_list_has_no_default() {
        let err = SectionList::new(Vec::new()).resolve(None).unwrap_err();
        assert!(matches!(err, ConfigError::NoSections));
    }

    #[test]
    fn celestrak_list_defaults_to_weather() {
        let list = SectionList::celestrak();
        assert!(!list.is_empty());
        assert_eq!(list.default_section().unwrap().name, "Weather");
    }

    #[test]
    fn loads_sections_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "- name: Weather\n  url: http://example.com/weather.txt\n\
             - name: NOAA\n  url: http://example.com/noaa.txt"
        )
        .unwrap();

        let list = SectionList::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.find("NOAA").unwrap().url, "http://example.com/noaa.txt");
    }
}
