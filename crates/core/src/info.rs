//! Document-level metadata from the top-level `info` record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::PathBuf;
use tracing::warn;

/// API metadata. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiInfo {
    /// API title.
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    /// API version. YAML documents often carry it as a number.
    #[serde(deserialize_with = "scalar_string")]
    pub version: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Terms of service URL.
    pub terms_of_service: Option<String>,
    /// License information.
    pub license: Option<License>,
    /// Contact information.
    pub contact: Option<Contact>,
}

/// `info.license`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct License {
    /// License name.
    pub name: Option<String>,
    /// License URL.
    pub url: Option<String>,
}

/// `info.contact`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Contact name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact URL.
    pub url: Option<String>,
}

impl ApiInfo {
    /// Read an `info` record. Unreadable records count as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        match Self::deserialize(value) {
            Ok(info) => Some(info),
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable info record.");
                None
            }
        }
    }

    /// Header lines describing the API, absent fields omitted.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(format!("Title: {title}"));
        }
        if let Some(version) = &self.version {
            lines.push(format!("Version: {version}"));
        }
        if let Some(description) = &self.description {
            lines.push(format!("Description: {description}"));
        }
        if let Some(license) = self.license.as_ref().and_then(License::summary) {
            lines.push(format!("License: {license}"));
        }
        if let Some(terms) = &self.terms_of_service {
            lines.push(format!("Terms of service: {terms}"));
        }
        if let Some(contact) = self.contact.as_ref().and_then(Contact::summary) {
            lines.push(format!("Contact: {contact}"));
        }
        lines
    }

    /// Relative directory `<title>/<version>` for the output file.
    ///
    /// The title loses its whitespace and is lowercased. `None` unless both
    /// fields are present and non-empty after cleaning.
    pub fn output_subdir(&self) -> Option<PathBuf> {
        let title = path_component(self.title.as_deref()?)?.to_lowercase();
        let version = path_component(self.version.as_deref()?)?;
        Some(PathBuf::from(title).join(version))
    }
}

impl License {
    fn summary(&self) -> Option<String> {
        match (&self.name, &self.url) {
            (Some(name), Some(url)) => Some(format!("{name} ({url})")),
            (Some(name), None) => Some(name.clone()),
            (None, Some(url)) => Some(format!("({url})")),
            (None, None) => None,
        }
    }
}

impl Contact {
    fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.name.clone(),
            self.email.as_ref().map(|email| format!("<{email}>")),
            self.url.as_ref().map(|url| format!("({url})")),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Drop whitespace and path separators; `None` if only dots (or nothing) remain.
fn path_component(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '\\'))
        .collect();
    if cleaned.chars().all(|c| c == '.') {
        None
    } else {
        Some(cleaned)
    }
}

/// Accept strings, numbers and booleans as text.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
