//! Front matter parsing for markdown topics.
//!
//! A topic file may start with a `---` delimited block of `key: value` lines.
//! Only `title` and `description` are recognised.

use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    pub body: String,
}

const DELIMITER: &str = "---";

impl FrontMatter {
    /// Parse a document. Input without a complete front matter block is all body.
    pub fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.split('\n').collect();

        if lines.first().map(|l| l.trim()) != Some(DELIMITER) {
            return Self::body_only(content);
        }

        let end = match lines
            .iter()
            .skip(1)
            .position(|line| line.trim() == DELIMITER)
        {
            Some(offset) => offset + 1,
            None => return Self::body_only(content),
        };

        let mut fm = FrontMatter::default();
        for line in &lines[1..end] {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            match key.trim() {
                "title" => fm.title = value.trim().to_string(),
                "description" => fm.description = value.trim().to_string(),
                _ => {}
            }
        }

        if end + 1 < lines.len() {
            fm.body = lines[end + 1..].join("\n").trim().to_string();
        }

        fm
    }

    /// Read and parse a markdown file
    pub fn parse_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    fn body_only(content: &str) -> Self {
        Self {
            body: content.to_string(),
            ..Self::default()
        }
    }
}

/// Turn a slug like `time-management_tips` into `Time Management Tips`
pub fn humanize(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Humanize the last component of a `/` separated path
pub fn humanize_path(path: &str) -> String {
    let base = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    humanize(base)
}
