use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SearchConfig;
use crate::content::ContentStore;
use crate::frontmatter::{humanize, FrontMatter};
use crate::models::SearchResult;

const ELLIPSIS: &str = "...";
/// How far before the first match a snippet starts
const LEAD_IN: usize = 40;
/// How far the snippet start may move forward to land on a word boundary
const WORD_BOUNDARY_WINDOW: usize = 20;

/// Recursive, all-terms-must-match full-text search over the content tree
pub struct TopicSearcher {
    store: ContentStore,
    max_results: usize,
    snippet_length: usize,
}

impl TopicSearcher {
    pub fn new(store: ContentStore, config: &SearchConfig) -> Self {
        Self {
            store,
            max_results: config.max_results,
            snippet_length: config.snippet_length,
        }
    }

    /// Search every markdown file under `scope` (or the whole tree).
    ///
    /// An empty query, or a scope outside the content root, yields no results.
    pub fn search(&self, query: &str, scope: Option<&str>) -> Vec<SearchResult> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let start = match scope.map(|s| s.trim_matches('/')).filter(|s| !s.is_empty()) {
            Some(scope) => match self.store.resolve(scope) {
                Some(dir) => dir,
                None => {
                    tracing::warn!(scope = %scope, "Rejected search scope outside content root");
                    return Vec::new();
                }
            },
            None => self.store.root().to_path_buf(),
        };

        let mut results = Vec::new();
        self.search_dir(&start, &terms, &mut results);
        tracing::debug!(terms = terms.len(), hits = results.len(), "Search finished");
        results
    }

    fn search_dir(&self, dir: &Path, terms: &[String], results: &mut Vec<SearchResult>) {
        if results.len() >= self.max_results {
            return;
        }

        let mut entries: Vec<(String, PathBuf, bool)> = match fs::read_dir(dir) {
            Ok(entries) => entries
                .flatten()
                .map(|e| {
                    let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    (e.file_name().to_string_lossy().to_string(), e.path(), is_dir)
                })
                .collect(),
            Err(e) => {
                tracing::debug!("Skipping unreadable directory {}: {}", dir.display(), e);
                return;
            }
        };
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path, is_dir) in entries {
            if results.len() >= self.max_results {
                return;
            }
            if name.starts_with('.') {
                continue;
            }

            if is_dir {
                self.search_dir(&path, terms, results);
            } else if name.ends_with(".md") {
                if let Some(hit) = self.search_file(&path, terms) {
                    results.push(hit);
                }
            }
        }
    }

    fn search_file(&self, path: &Path, terms: &[String]) -> Option<SearchResult> {
        let fm = FrontMatter::parse_file(path).ok()?;

        let haystack = format!("{} {} {}", fm.title, fm.description, fm.body).to_lowercase();
        if !terms.iter().all(|term| haystack.contains(term.as_str())) {
            return None;
        }

        let title = if fm.title.is_empty() {
            let stem = path.file_stem().map(|s| s.to_string_lossy().to_string());
            humanize(&stem.unwrap_or_default())
        } else {
            fm.title.clone()
        };

        Some(SearchResult {
            path: self.result_path(path),
            title,
            snippet: extract_snippet(&fm.body, &terms[0], self.snippet_length),
        })
    }

    /// `/`-rooted topic path: `.md` and a trailing `/_index` are dropped
    fn result_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(self.store.root()).unwrap_or(path);
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let rel = rel.strip_suffix(".md").unwrap_or(&rel);
        let rel = rel.strip_suffix("/_index").unwrap_or(rel);
        format!("/{}", rel)
    }
}

/// Cut a window of `max_len` bytes of `text` around the first
/// case-insensitive occurrence of `term`
pub fn extract_snippet(text: &str, term: &str, max_len: usize) -> String {
    let idx = match find_case_insensitive(text, term) {
        Some(idx) => idx,
        None => {
            if text.len() > max_len {
                let end = floor_char_boundary(text, max_len);
                return format!("{}{}", &text[..end], ELLIPSIS);
            }
            return text.to_string();
        }
    };

    let mut start = floor_char_boundary(text, idx.saturating_sub(LEAD_IN));
    if start > 0 {
        if let Some(space) = text[start..].find(' ') {
            if space < WORD_BOUNDARY_WINDOW {
                start += space + 1;
            }
        }
    }

    let end = floor_char_boundary(text, (start + max_len).min(text.len()));

    let mut snippet = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(&text[start..end]);
    if end < text.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Byte offset of `needle` in `haystack`, ignoring case
fn find_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        let mut rest = haystack[i..].chars().flat_map(char::to_lowercase);
        needle.iter().all(|n| rest.next() == Some(*n))
    })
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
