//! The two-step processor contract: transform a file for the linter, then
//! translate the linter's diagnostics back.

use std::sync::Arc;

use lattelint_ast::MAX_TEXT_LEN;
use tracing::{debug, warn};

use crate::config::ProcessorConfig;
use crate::diagnostic::Diagnostic;
use crate::language::HostLanguage;
use crate::line_index::LineIndex;
use crate::region::detect_regions;
use crate::remap::Remapper;
use crate::replacement::{ReplacementFn, ReplacementPolicy};
use crate::rewriter::{MappingRecord, rewrite};
use crate::scanner::scan_directives;

/// Everything needed to remap one file's diagnostics.
///
/// Returned by [`LatteProcessor::transform`] and consumed by
/// [`LatteProcessor::remap`] for the same file. Each file gets its own
/// context, so files may be processed on different threads.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    filename: String,
    language: Option<HostLanguage>,
    original: LineIndex,
    transformed: LineIndex,
    records: Vec<MappingRecord>,
}

impl ProcessingContext {
    fn passthrough(text: &str, filename: &str) -> Self {
        let index = LineIndex::new(text);
        Self {
            filename: filename.to_string(),
            language: None,
            original: index.clone(),
            transformed: index,
            records: Vec::new(),
        }
    }

    /// The file identifier passed to `transform`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The host language, or `None` when the file was passed through.
    pub fn language(&self) -> Option<HostLanguage> {
        self.language
    }

    /// Whether the file matched a template extension.
    pub fn is_template(&self) -> bool {
        self.language.is_some()
    }

    /// The text as written by the user.
    pub fn original_text(&self) -> &str {
        self.original.text()
    }

    /// The text handed to the linter.
    pub fn transformed_text(&self) -> &str {
        self.transformed.text()
    }

    /// The processable blocks handed to the linter; always exactly one.
    pub fn texts(&self) -> Vec<&str> {
        vec![self.transformed.text()]
    }

    /// Mapping records, ascending by original offset.
    pub fn records(&self) -> &[MappingRecord] {
        &self.records
    }

    /// A remapper over this context's records.
    pub fn remapper(&self) -> Remapper<'_> {
        Remapper::new(&self.records, &self.original, &self.transformed)
    }
}

/// Preprocessor for template files with `{...}` directives.
#[derive(Debug, Clone, Default)]
pub struct LatteProcessor {
    config: ProcessorConfig,
    policy: ReplacementPolicy,
}

impl LatteProcessor {
    /// Creates a processor. A non-empty `replacements` table in `config`
    /// becomes the custom replacement.
    pub fn new(config: ProcessorConfig) -> Self {
        let policy = if config.replacements.is_empty() {
            ReplacementPolicy::new()
        } else {
            let table = config.replacements.clone();
            ReplacementPolicy::with_custom(Arc::new(move |content: &str| {
                table.get(content).cloned()
            }))
        };

        Self { config, policy }
    }

    /// Sets a custom replacement, consulted before the built-in rule.
    ///
    /// Returning `None` defers to the built-in rule. Replaces any table from
    /// the configuration.
    pub fn with_replacement_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        let custom: Arc<ReplacementFn> = Arc::new(f);
        self.policy = ReplacementPolicy::with_custom(custom);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Produces the linter input for one file.
    ///
    /// Files whose name does not end with a configured extension pass
    /// through unchanged, as do texts longer than [`MAX_TEXT_LEN`] bytes.
    pub fn transform(&self, text: &str, filename: &str) -> ProcessingContext {
        let Some(extension) = self.config.matching_extension(filename) else {
            debug!("{}: not a template, passing through", filename);
            return ProcessingContext::passthrough(text, filename);
        };

        if text.len() > MAX_TEXT_LEN {
            warn!(
                "{}: {} bytes exceeds the {} byte limit, passing through",
                filename,
                text.len(),
                MAX_TEXT_LEN
            );
            return ProcessingContext::passthrough(text, filename);
        }

        let regions = detect_regions(text);
        let directives = scan_directives(text, &regions);
        let rewritten = rewrite(text, &directives, &self.policy);

        debug!(
            "{}: {} directives replaced, {} mode regions",
            filename,
            rewritten.records.len(),
            regions.len()
        );

        ProcessingContext {
            filename: filename.to_string(),
            language: Some(HostLanguage::detect(filename, extension)),
            original: LineIndex::new(text),
            transformed: LineIndex::new(rewritten.text),
            records: rewritten.records,
        }
    }

    /// Translates the linter's diagnostics for the file `context` was made for.
    ///
    /// Groups are flattened in order. With `removeLatteErrors`, diagnostics
    /// that resolve inside a directive are dropped.
    pub fn remap(
        &self,
        context: ProcessingContext,
        groups: Vec<Vec<Diagnostic>>,
    ) -> Vec<Diagnostic> {
        let diagnostics = groups.into_iter().flatten();
        if context.records.is_empty() {
            return diagnostics.collect();
        }

        let remapper = context.remapper();
        diagnostics
            .filter(|diagnostic| {
                let drop =
                    self.config.remove_latte_errors && remapper.concerns_directive(diagnostic);
                if drop {
                    debug!(
                        "{}: dropping {} diagnostic in directive: {}",
                        context.filename,
                        diagnostic.rule_id().unwrap_or("parse"),
                        diagnostic.message().unwrap_or_default()
                    );
                }
                !drop
            })
            .map(|diagnostic| remapper.remap(&diagnostic))
            .collect()
    }
}
