//! In-memory `@import` resolution.
//!
//! [`MapImporter`] serves stylesheets from a path → text table, the way a
//! file-system loader would: relative to the importing file first, then
//! from the table root, trying the partial (`_name`) and `.scss` spellings.

use rustc_hash::FxHashMap;
use sable_diagnostic::SourceMap;
use sable_eval::{ImportResolver, ResolvedImport};
use sable_ir::SourceId;
use sable_parse::{parse_stylesheet, ParseError, ParserConfig};
use sable_stack::DEFAULT_MAX_NESTING;
use sable_value::{EvalError, EvalErrorKind, EvalResult};
use tracing::trace;

/// Serves imports from a table of named texts.
///
/// Every load gets its own [`SourceId`], in load order starting after
/// [`SourceId::ROOT`], so spans inside imported files stay distinguishable
/// from the entry file. [`MapImporter::source_map`] rebuilds the matching
/// [`SourceMap`] for error reporting.
#[derive(Clone, Debug)]
pub struct MapImporter {
    files: FxHashMap<String, String>,
    loaded: Vec<String>,
    max_nesting: usize,
}

impl Default for MapImporter {
    fn default() -> Self {
        MapImporter {
            files: FxHashMap::default(),
            loaded: Vec::new(),
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl MapImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous text under the same path.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(normalize(&path.into()), text.into());
    }

    /// Nesting limit applied when imported files are parsed.
    #[must_use]
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    /// Paths loaded so far, in load order. A file imported twice appears
    /// twice.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    /// Source map with the entry text at [`SourceId::ROOT`] followed by
    /// every loaded file.
    pub fn source_map(&self, entry_name: &str, entry_text: &str) -> SourceMap {
        let mut sources = SourceMap::new();
        sources.add(entry_name, entry_text);
        for path in &self.loaded {
            let text = self.files.get(path).map_or("", String::as_str);
            sources.add(path.as_str(), text);
        }
        sources
    }

    /// First table entry that `url`, imported from `base`, refers to.
    fn find(&self, url: &str, base: &str) -> Option<String> {
        let dir = match base.rfind('/') {
            Some(slash) => &base[..slash],
            None => "",
        };
        let roots = [dir, ""];
        let roots = if dir.is_empty() { &roots[1..] } else { &roots[..] };
        roots.iter().find_map(|root| {
            let joined = if root.is_empty() {
                url.to_owned()
            } else {
                format!("{root}/{url}")
            };
            candidates(&normalize(&joined))
                .into_iter()
                .find(|path| self.files.contains_key(path))
        })
    }

    fn next_source(&self) -> SourceId {
        SourceId(u32::try_from(self.loaded.len() + 1).unwrap_or(u32::MAX))
    }
}

impl ImportResolver for MapImporter {
    fn resolve(&mut self, url: &str, base: &str) -> EvalResult<Option<ResolvedImport>> {
        let Some(path) = self.find(url, base) else {
            trace!(url, base, "import not found");
            return Ok(None);
        };
        let config = ParserConfig {
            max_nesting: self.max_nesting,
            source: self.next_source(),
        };
        let text = self.files.get(&path).map_or("", String::as_str);
        let parsed = parse_stylesheet(text, &config);
        self.loaded.push(path.clone());
        let stylesheet = parsed.map_err(syntax_error)?;
        trace!(url, base, %path, "import resolved");
        Ok(Some(ResolvedImport { path, stylesheet }))
    }
}

/// A parse error inside an imported file, kept at its own location.
fn syntax_error(err: ParseError) -> EvalError {
    let span = err.span;
    EvalError::from_kind(EvalErrorKind::Syntax {
        message: err.message,
    })
    .with_span(span)
}

/// `path` as written, then with `.scss`, then the partial spellings.
fn candidates(path: &str) -> Vec<String> {
    let (dir, name) = match path.rfind('/') {
        Some(slash) => (&path[..=slash], &path[slash + 1..]),
        None => ("", path),
    };
    let mut out = vec![path.to_owned()];
    if !name.ends_with(".scss") {
        out.push(format!("{path}.scss"));
    }
    if !name.starts_with('_') {
        out.push(format!("{dir}_{name}"));
        if !name.ends_with(".scss") {
            out.push(format!("{dir}_{name}.scss"));
        }
    }
    out
}

/// Collapse `.` and `..` segments and repeated slashes.
fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            _ => parts.push(segment),
        }
    }
    parts.join("/")
}
