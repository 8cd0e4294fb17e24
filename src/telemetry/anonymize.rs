use std::path::Path;

use serde::Serialize;

/// Replace every ASCII letter and digit with its class marker
/// (`0`, `a` or `A`). Everything else, including non-ASCII text, passes
/// through, so the result keeps the shape of the input but none of its
/// content.
pub fn anonymize(input: &str) -> String {
    input
        .chars()
        .map(|ch| match ch {
            '0'..='9' => '0',
            'a'..='z' => 'a',
            'A'..='Z' => 'A',
            other => other,
        })
        .collect()
}

pub const MIME_UNKNOWN: &str = "application/unknown";

/// Reportable description of a file: its type and the shape of its path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl FileDescriptor {
    pub fn from_path(path: &Path) -> Self {
        let raw = path.to_string_lossy();
        if raw.is_empty() {
            return Self::default();
        }

        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Self {
            mime_type: Some(guess_mime_type(&ext).to_string()),
            ext: Some(ext),
            path: Some(anonymize(&raw)),
        }
    }
}

fn guess_mime_type(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        ".txt" | ".log" => "text/plain",
        ".md" | ".markdown" => "text/x-markdown",
        ".json" => "application/json",
        ".js" | ".mjs" => "text/javascript",
        ".ts" => "text/typescript",
        ".rs" => "text/x-rust",
        ".html" | ".htm" => "text/html",
        ".css" => "text/css",
        ".xml" => "text/xml",
        ".yaml" | ".yml" => "text/x-yaml",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        _ => MIME_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_structure_not_content() {
        assert_eq!(anonymize("User123!"), "Aaaa000!");
        assert_eq!(anonymize(""), "");
        assert_eq!(anonymize("/home/Ana/é.txt"), "/aaaa/Aaa/é.aaa");
    }

    #[test]
    fn descriptor_anonymizes_path() {
        let descriptor = FileDescriptor::from_path(Path::new("/Users/Bob/notes2.md"));
        assert_eq!(descriptor.path.as_deref(), Some("/Aaaaa/Aaa/aaaaa0.aa"));
        assert_eq!(descriptor.ext.as_deref(), Some(".md"));
        assert_eq!(descriptor.mime_type.as_deref(), Some("text/x-markdown"));

        assert_eq!(FileDescriptor::from_path(Path::new("")), FileDescriptor::default());
    }
}
