//! # lattelint_core
//!
//! Lets a general-purpose linter check the script, style or markup inside
//! Latte-style templates.
//!
//! This crate provides:
//! - Directive detection, honoring `n:syntax` mode regions
//! - Placeholder substitution producing text the linter can parse
//! - Remapping of diagnostics and fixes back to the original template
//! - Configuration loading and fix application
//!
//! ## Example
//!
//! ```rust,ignore
//! use lattelint_core::{Diagnostic, LatteProcessor, ProcessorConfig};
//!
//! let processor = LatteProcessor::new(ProcessorConfig::default());
//! let context = processor.transform("let user = {$user};", "app.js.latte");
//! assert_eq!(context.texts(), vec!["let user = [];"]);
//!
//! let diagnostics = run_linter(context.transformed_text());
//! let remapped = processor.remap(context, vec![diagnostics]);
//! ```

mod config;
mod diagnostic;
mod error;
mod fixer;
mod language;
pub mod line_index;
mod processor;
pub mod region;
pub mod remap;
pub mod replacement;
pub mod rewriter;
pub mod scanner;

pub use config::ProcessorConfig;
pub use diagnostic::{Diagnostic, Fix, Severity};
pub use error::ProcessorError;
pub use fixer::{FixerResult, apply_fixes_to_content, apply_fixes_to_file};
pub use language::HostLanguage;
pub use line_index::LineIndex;
pub use processor::{LatteProcessor, ProcessingContext};
pub use remap::{Anchor, Remapper};
pub use replacement::{PLACEHOLDER, ReplacementFn, ReplacementPolicy};
pub use rewriter::MappingRecord;

pub use lattelint_ast::{Position, Span};
