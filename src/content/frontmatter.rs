//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Front-matter delimiter line
const DELIMITER: &str = "---";

/// Front-matter data from a post or page
///
/// An ordered mapping of string keys to YAML values. The conventional keys
/// `title`, `description`, `subtitle` and `date` have typed accessors; any
/// other key is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content that does not open with a `---` line, or never closes the
    /// block, is returned whole with empty front-matter. A block that is not
    /// a valid YAML mapping is an error.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let text = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(after_open) = strip_delimiter_line(text) else {
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in after_open.split_inclusive('\n') {
            if is_delimiter(line) {
                let yaml_content = &after_open[..offset];
                let remaining = &after_open[offset + line.len()..];
                return Ok((Self::from_yaml(yaml_content)?, remaining));
            }
            offset += line.len();
        }

        // No closing ---, treat as no front-matter
        Ok((FrontMatter::default(), content))
    }

    /// Parse a bare YAML mapping (without delimiters)
    pub fn from_yaml(yaml_content: &str) -> Result<Self, serde_yaml::Error> {
        if yaml_content.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        let fields: IndexMap<String, serde_yaml::Value> = serde_yaml::from_str(yaml_content)?;
        Ok(Self { fields })
    }

    /// Serialize the mapping back to YAML (without delimiters)
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        if self.fields.is_empty() {
            return Ok(String::new());
        }
        serde_yaml::to_string(&self.fields)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.fields.get(key)
    }

    /// Value for a key rendered as text; numbers and booleans are stringified
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_yaml::Value)> {
        self.fields.iter()
    }

    pub fn title(&self) -> Option<String> {
        self.get_str("title").filter(|s| !s.trim().is_empty())
    }

    pub fn description(&self) -> Option<String> {
        self.get_str("description").filter(|s| !s.trim().is_empty())
    }

    pub fn subtitle(&self) -> Option<String> {
        self.get_str("subtitle").filter(|s| !s.trim().is_empty())
    }

    /// Parse the date string into a DateTime
    pub fn date(&self) -> Option<DateTime<Local>> {
        self.get_str("date").and_then(|s| parse_date_string(&s))
    }
}

/// Strip an opening delimiter line, returning the text after it
fn strip_delimiter_line(text: &str) -> Option<&str> {
    let (first, rest) = match text.find('\n') {
        Some(pos) => (&text[..pos + 1], &text[pos + 1..]),
        None => (text, ""),
    };
    is_delimiter(first).then_some(rest)
}

/// A line consisting of exactly `---`
fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    // Try RFC 3339 / ISO 8601 with offset first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return dt.and_local_timezone(Local).earliest();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0)?.and_local_timezone(Local).earliest();
        }
    }

    None
}
