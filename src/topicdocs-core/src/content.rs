use pulldown_cmark::{html, Options, Parser};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::frontmatter::{humanize, humanize_path, FrontMatter};
use crate::models::{Breadcrumb, TopicDetail, TopicSummary};

/// Section landing pages live in `<dir>/_index.md`
pub const INDEX_FILE: &str = "_index.md";
const MARKDOWN_EXT: &str = ".md";

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("topic not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ContentError>;

/// Read-only view over a directory tree of markdown topics
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top-level topics
    pub fn list_topics(&self) -> Result<Vec<TopicSummary>> {
        list_children(&self.root)
    }

    /// Load a topic by its `/` separated path relative to the content root.
    ///
    /// A directory resolves to its `_index.md` plus its children; anything
    /// else resolves to `<path>.md`.
    pub fn get_topic(&self, rel_path: &str) -> Result<TopicDetail> {
        let rel_path = normalize(rel_path)
            .ok_or_else(|| ContentError::NotFound(rel_path.to_string()))?;
        let full_path = self.root.join(&rel_path);

        if full_path.is_dir() {
            return self.directory_topic(&full_path, &rel_path);
        }

        let md_path = with_markdown_ext(&full_path);
        if md_path.is_file() {
            return self.file_topic(&md_path, &rel_path);
        }

        Err(ContentError::NotFound(rel_path))
    }

    /// Join a relative path onto the root, refusing anything that could escape it
    pub fn resolve(&self, rel_path: &str) -> Option<PathBuf> {
        normalize(rel_path).map(|rel| self.root.join(rel))
    }

    fn directory_topic(&self, dir: &Path, rel_path: &str) -> Result<TopicDetail> {
        // A section without _index.md is still a valid topic
        let fm = FrontMatter::parse_file(dir.join(INDEX_FILE)).unwrap_or_default();
        let children = match list_children(dir) {
            Ok(children) => children,
            Err(e) => {
                tracing::warn!("Failed to list children of {}: {}", dir.display(), e);
                Vec::new()
            }
        };

        Ok(TopicDetail {
            title: title_or(&fm.title, || humanize_path(rel_path)),
            description: fm.description,
            content_html: render_markdown(&fm.body),
            children,
            breadcrumbs: build_breadcrumbs(rel_path),
        })
    }

    fn file_topic(&self, file: &Path, rel_path: &str) -> Result<TopicDetail> {
        let fm = FrontMatter::parse_file(file).map_err(|source| ContentError::Io {
            path: file.to_path_buf(),
            source,
        })?;

        Ok(TopicDetail {
            title: title_or(&fm.title, || humanize_path(rel_path)),
            description: fm.description,
            content_html: render_markdown(&fm.body),
            children: Vec::new(),
            breadcrumbs: build_breadcrumbs(rel_path),
        })
    }
}

/// List the child topics of a directory: sub-directories first, then
/// markdown files, each group ordered by slug. Hidden and `_` prefixed
/// entries are skipped.
pub fn list_children(dir: &Path) -> Result<Vec<TopicSummary>> {
    let entries = fs::read_dir(dir).map_err(|source| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut children = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir && !name.ends_with(MARKDOWN_EXT) {
            continue;
        }

        if let Some(summary) = read_topic_summary(dir, &name, is_dir) {
            children.push(summary);
        }
    }

    children.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.slug.cmp(&b.slug)));

    Ok(children)
}

/// Summarise one directory entry. Returns `None` for entries that are not topics.
pub fn read_topic_summary(base: &Path, name: &str, is_dir: bool) -> Option<TopicSummary> {
    let slug = name.strip_suffix(MARKDOWN_EXT).unwrap_or(name).to_string();
    if slug.is_empty() {
        return None;
    }

    if is_dir {
        let fm = FrontMatter::parse_file(base.join(name).join(INDEX_FILE)).unwrap_or_default();
        return Some(TopicSummary {
            title: title_or(&fm.title, || humanize(&slug)),
            description: fm.description,
            slug,
            is_dir: true,
        });
    }

    if !name.ends_with(MARKDOWN_EXT) || name == INDEX_FILE {
        return None;
    }

    let fm = match FrontMatter::parse_file(base.join(name)) {
        Ok(fm) => fm,
        Err(e) => {
            tracing::debug!("Unreadable topic {}: {}", name, e);
            FrontMatter::default()
        }
    };

    Some(TopicSummary {
        title: title_or(&fm.title, || humanize(&slug)),
        description: fm.description,
        slug,
        is_dir: false,
    })
}

/// Clean a relative topic path down to its plain segments joined by `/`.
///
/// `.` segments and redundant slashes disappear; `..`, root and prefix
/// components make the path unusable.
pub fn normalize(rel_path: &str) -> Option<String> {
    let mut parts = Vec::new();
    for component in Path::new(rel_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.join("/"))
}

/// One crumb per path segment, each linking to the path up to and including it
pub fn build_breadcrumbs(rel_path: &str) -> Vec<Breadcrumb> {
    let parts: Vec<&str> = rel_path.split('/').filter(|p| !p.is_empty()).collect();

    parts
        .iter()
        .enumerate()
        .map(|(i, part)| Breadcrumb {
            slug: part.to_string(),
            title: humanize(part),
            path: format!("/{}", parts[..=i].join("/")),
        })
        .collect()
}

/// Render CommonMark to HTML
pub fn render_markdown(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn title_or(title: &str, fallback: impl FnOnce() -> String) -> String {
    if title.is_empty() {
        fallback()
    } else {
        title.to_string()
    }
}

fn with_markdown_ext(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(MARKDOWN_EXT);
    PathBuf::from(os)
}
