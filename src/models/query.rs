use std::fmt;

/// Flattened `<category>id=<value>` conditions that narrow a search-API call
/// down to a page containing one restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFragment {
    pairs: Vec<(String, String)>,
}

impl QueryFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_condition(&mut self, category: &str, value: impl Into<String>) {
        self.pairs.push((format!("{category}id"), value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
