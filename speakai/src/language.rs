//! Language tags accepted by the service.

use crate::AppError;

/// Reduce `tag` to its lower-cased primary subtag (`en-US` becomes `en`).
///
/// Returns `None` for tags without an alphabetic primary subtag.
pub fn normalize(tag: &str) -> Option<String> {
    let primary = tag.trim().split(['-', '_']).next()?;
    if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(primary.to_ascii_lowercase())
}

/// Fixed set of supported languages with a default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageSet {
    tags: Vec<String>,
    default: String,
}

impl LanguageSet {
    /// Build a set from raw tags; invalid and duplicate tags are skipped.
    pub fn new<I, S>(tags: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            if let Some(t) = normalize(tag.as_ref()) {
                if !out.contains(&t) {
                    out.push(t);
                }
            }
        }
        Self {
            tags: out,
            default: normalize(default).unwrap_or_default(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn default_tag(&self) -> &str {
        &self.default
    }

    pub fn contains(&self, tag: &str) -> bool {
        normalize(tag).is_some_and(|t| self.tags.contains(&t))
    }

    /// Pick the language for a request, falling back to the default.
    pub fn resolve(&self, requested: Option<&str>) -> Result<String, AppError> {
        let requested = match requested.map(str::trim) {
            None | Some("") => return Ok(self.default.clone()),
            Some(tag) => tag,
        };
        match normalize(requested) {
            Some(tag) if self.tags.contains(&tag) => Ok(tag),
            _ => Err(AppError::validation(format!(
                "Unsupported language: {requested}"
            ))),
        }
    }
}
