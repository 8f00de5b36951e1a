use std::fmt;

use serde::{Deserialize, Serialize};

/// Handler category. Every handler belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Tool calls.
    Action,
    /// Resource reads.
    DataRead,
    /// Prompt generation.
    Template,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Action, Category::DataRead, Category::Template];

    /// Stable label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::DataRead => "data-read",
            Category::Template => "template",
        }
    }

    /// What a handler of this category is called in client-facing messages.
    pub fn noun(self) -> &'static str {
        match self {
            Category::Action => "tool",
            Category::DataRead => "resource",
            Category::Template => "prompt",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
