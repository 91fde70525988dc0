//! Syntax highlighting manager
//!
//! The manager coordinates language detection, colorization, and
//! per-document caching. It owns the registered grammars and one
//! `HighlightCache` per open document; the engine itself stays free of
//! any cross-call state.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

use super::builtin;
use super::language::Grammar;
use super::state::LineState;
use super::tokens::Span;
use crate::config::Config;

/// Per-document highlighting cache
///
/// Line states are stored packed (one `u32` per line boundary) and
/// decoded on the way back into the engine.
pub struct HighlightCache {
    /// Language for this document (None if no highlighting)
    pub language: Option<String>,
    /// Packed lexical state at the end of each line
    pub line_states: Vec<u32>,
    /// Cached spans per line (None = not computed)
    pub line_spans: Vec<Option<Vec<Span>>>,
    /// First line that needs recomputation
    pub invalid_from: usize,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            language: None,
            line_states: Vec::new(),
            line_spans: Vec::new(),
            invalid_from: 0,
        }
    }

    /// Set the language for this document
    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
        self.invalidate_all();
    }

    /// Invalidate cache from a specific line onwards
    ///
    /// Everything at or below an edit must be recomputed; the states
    /// above it stay valid.
    pub fn invalidate_from(&mut self, line: usize) {
        self.invalid_from = self.invalid_from.min(line);
        for spans in self.line_spans.iter_mut().skip(line) {
            *spans = None;
        }
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.invalid_from = 0;
        self.line_states.clear();
        self.line_spans.clear();
    }

    /// Ensure cache vectors are large enough
    pub fn ensure_size(&mut self, line_count: usize) {
        if self.line_states.len() < line_count {
            self.line_states.resize(line_count, LineState::Normal.encode());
        }
        if self.line_spans.len() < line_count {
            self.line_spans.resize(line_count, None);
        }
    }

    /// State the given line starts in
    pub fn state_before(&self, line: usize) -> LineState {
        if line == 0 {
            return LineState::Normal;
        }
        match self.line_states.get(line - 1) {
            Some(bits) => LineState::decode(*bits),
            None => LineState::Normal,
        }
    }
}

impl Default for HighlightCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Main syntax highlighting manager
pub struct SyntaxManager {
    /// Registered grammars
    languages: HashMap<String, Grammar>,
    /// Extension to language name mapping
    extension_map: HashMap<String, String>,
    /// Shebang interpreter to language name mapping
    interpreter_map: HashMap<String, String>,
    /// Per-document caches (document id -> cache)
    caches: HashMap<usize, HighlightCache>,
    /// Extracts the interpreter name from a shebang line
    shebang: Option<Regex>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a new manager with the built-in languages
    pub fn new() -> Self {
        let mut manager = Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
            interpreter_map: HashMap::new(),
            caches: HashMap::new(),
            shebang: Regex::new(r"^#!\s*(?:\S*/)?(?:env\s+)?(\w+)").ok(),
            enabled: true,
        };

        for lang in builtin::all_languages() {
            manager.add_language(lang);
        }

        manager
    }

    /// Register a grammar
    pub fn add_language(&mut self, lang: Grammar) {
        let name = lang.name.clone();
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        for interp in &lang.interpreters {
            self.interpreter_map.insert(interp.clone(), name.clone());
        }
        self.languages.insert(name, lang);
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// Detect language from a shebang first line
    pub fn detect_shebang(&self, first_line: &str) -> Option<&str> {
        let captures = self.shebang.as_ref()?.captures(first_line)?;
        let interp = captures.get(1)?.as_str();
        self.interpreter_map.get(interp).map(|s| s.as_str())
    }

    /// Get a grammar by name
    pub fn get_language(&self, name: &str) -> Option<&Grammar> {
        self.languages.get(name)
    }

    /// Resolve a grammar's delegate mode, if it names one
    pub fn fallback_of(&self, name: &str) -> Option<&Grammar> {
        let fallback = self.languages.get(name)?.fallback.as_ref()?;
        self.languages.get(fallback)
    }

    /// Merge user configuration into the registered grammars
    pub fn apply_config(&mut self, config: &Config) {
        for (lang_name, words) in &config.extra_keywords {
            if let Some(lang) = self.languages.get_mut(lang_name) {
                lang.keywords.extend(words.iter().cloned());
            }
        }
    }

    /// Get or create a cache for a document
    pub fn get_cache(&mut self, doc: usize) -> &mut HighlightCache {
        self.caches.entry(doc).or_default()
    }

    /// Remove cache for a document (when it is closed)
    pub fn remove_cache(&mut self, doc: usize) {
        self.caches.remove(&doc);
    }

    /// Set language for a document based on filename
    pub fn set_document_language(&mut self, doc: usize, filename: Option<&Path>) {
        let lang_name = filename
            .and_then(|f| self.detect_language(f))
            .map(|s| s.to_string());
        let cache = self.get_cache(doc);
        cache.set_language(lang_name);
    }

    /// Invalidate cache from a line onwards
    pub fn invalidate_from(&mut self, doc: usize, line: usize) {
        if let Some(cache) = self.caches.get_mut(&doc) {
            cache.invalidate_from(line);
        }
    }

    /// Colorize a single line, using the cache when possible.
    ///
    /// The caller is responsible for sequencing: line N must have been
    /// colorized (or invalidated and recomputed) before line N + 1, so
    /// the cached end state of line N is current.
    pub fn highlight_line(
        &mut self,
        doc: usize,
        line_idx: usize,
        text: &str,
        line_count: usize,
    ) -> Vec<Span> {
        if !self.enabled {
            return Vec::new();
        }

        let cache = self.caches.entry(doc).or_default();
        cache.ensure_size(line_count);

        let lang_name = match &cache.language {
            Some(name) => name.clone(),
            None => return Vec::new(),
        };
        if let Some(spans) = cache.line_spans.get(line_idx).and_then(|s| s.as_ref()) {
            return spans.clone();
        }
        let incoming = cache.state_before(line_idx);

        let lang = match self.languages.get(&lang_name) {
            Some(lang) => lang,
            None => return Vec::new(),
        };
        let result = lang.colorize_line(text, incoming);

        let cache = self.caches.entry(doc).or_default();
        if line_idx < cache.line_states.len() {
            cache.line_states[line_idx] = result.end_state.encode();
        }
        if line_idx < cache.line_spans.len() {
            cache.line_spans[line_idx] = Some(result.spans.clone());
        }
        if cache.invalid_from <= line_idx {
            cache.invalid_from = line_idx + 1;
        }

        result.spans
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::new()
    }
}
