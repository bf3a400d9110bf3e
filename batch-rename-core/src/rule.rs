use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the match text goes when computing a new name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameMode {
    /// Add the match text before the stem
    Prepend,
    /// Add the match text after the stem
    Append,
    /// Replace the first occurrence of the match text in the stem
    #[default]
    Replace,
}

impl RenameMode {
    pub const ALL: [Self; 3] = [Self::Prepend, Self::Append, Self::Replace];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prepend => "prepend",
            Self::Append => "append",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for RenameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prepend" | "start" => Ok(Self::Prepend),
            "append" | "end" => Ok(Self::Append),
            "replace" => Ok(Self::Replace),
            _ => Err(format!("Invalid rename mode: {}", s)),
        }
    }
}

/// A batch rename rule applied to the stem of every listed file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub mode: RenameMode,
    /// Text to prepend/append, or the text to look for when replacing
    #[serde(default)]
    pub match_text: String,
    /// Substitute for the first occurrence of `match_text`; only used by [`RenameMode::Replace`]
    #[serde(default)]
    pub replacement_text: String,
}

impl RenameRule {
    pub fn new(mode: RenameMode, match_text: impl Into<String>) -> Self {
        Self {
            mode,
            match_text: match_text.into(),
            replacement_text: String::new(),
        }
    }

    pub fn prepend(text: impl Into<String>) -> Self {
        Self::new(RenameMode::Prepend, text)
    }

    pub fn append(text: impl Into<String>) -> Self {
        Self::new(RenameMode::Append, text)
    }

    pub fn replace(match_text: impl Into<String>, replacement_text: impl Into<String>) -> Self {
        Self {
            mode: RenameMode::Replace,
            match_text: match_text.into(),
            replacement_text: replacement_text.into(),
        }
    }

    /// Apply the rule to a stem (a file name without its extension)
    pub fn transform_stem(&self, stem: &str) -> String {
        match self.mode {
            RenameMode::Prepend => format!("{}{}", self.match_text, stem),
            RenameMode::Append => format!("{}{}", stem, self.match_text),
            RenameMode::Replace => {
                if self.match_text.is_empty() {
                    stem.to_string()
                } else {
                    stem.replacen(&self.match_text, &self.replacement_text, 1)
                }
            },
        }
    }

    /// Compute the new name for `name`, keeping its extension verbatim
    pub fn apply(&self, name: &str) -> String {
        let (stem, extension) = split_name(name);
        let mut proposed = self.transform_stem(stem);
        proposed.push_str(extension);
        proposed
    }
}

impl fmt::Display for RenameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            RenameMode::Prepend => write!(f, "prepend '{}'", self.match_text),
            RenameMode::Append => write!(f, "append '{}'", self.match_text),
            RenameMode::Replace => write!(
                f,
                "replace '{}' with '{}'",
                self.match_text, self.replacement_text
            ),
        }
    }
}

/// Split a file name into (stem, extension) at the last `.`.
///
/// The extension keeps its leading dot. A name without a dot, or whose only
/// dot is its first character (`.bashrc`), has an empty extension.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}
