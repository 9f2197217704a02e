//! File kinds keyed by extension, with the default content each one starts with.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Sql,
    Markdown,
    Json,
    Python,
    Other,
}

const SQL_TEMPLATE: &str = "-- Write your SQL query here\n";
const MARKDOWN_TEMPLATE: &str = "# New Document\n\nStart writing your markdown here...\n";
const JSON_TEMPLATE: &str = "{\n  \n}\n";
const PYTHON_TEMPLATE: &str = "\"\"\"Python script.\"\"\"\n\n\ndef main():\n    \"\"\"Main function.\"\"\"\n    pass\n\n\nif __name__ == \"__main__\":\n    main()\n";
const OTHER_TEMPLATE: &str = "-- New file\n";

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return FileKind::Other;
        };
        match ext.to_ascii_lowercase().as_str() {
            "sql" => FileKind::Sql,
            "md" => FileKind::Markdown,
            "json" => FileKind::Json,
            "py" => FileKind::Python,
            _ => FileKind::Other,
        }
    }

    pub fn default_template(self) -> &'static str {
        match self {
            FileKind::Sql => SQL_TEMPLATE,
            FileKind::Markdown => MARKDOWN_TEMPLATE,
            FileKind::Json => JSON_TEMPLATE,
            FileKind::Python => PYTHON_TEMPLATE,
            FileKind::Other => OTHER_TEMPLATE,
        }
    }

    /// Fence tag used when the file is inlined into a prompt.
    pub fn fence_tag(name: &str) -> &str {
        name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Sql => "sql",
            FileKind::Markdown => "markdown",
            FileKind::Json => "json",
            FileKind::Python => "python",
            FileKind::Other => "none",
        }
    }
}

/// Content that counts as "nothing written yet".
pub fn is_blank_content(content: &str) -> bool {
    content.trim().is_empty()
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_kind.rs"]
mod tests;
