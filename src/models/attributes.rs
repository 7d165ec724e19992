use std::collections::HashSet;
use std::path::Path;
use crate::error::Result;

/// Ordered, de-duplicated set of attribute names to keep from a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    names: Vec<String>,
}

impl AttributeList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect();

        Self { names }
    }

    /// Parses a newline-delimited list; blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
