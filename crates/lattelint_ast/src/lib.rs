//! # lattelint_ast
//!
//! Coordinate types shared by the lattelint crates.
//!
//! Spans are UTF-8 byte offsets into one buffer (either the original template
//! or the text handed to the linter). Positions are 1-indexed line/column pairs
//! where the column counts UTF-16 code units, matching the diagnostic schema
//! JavaScript-based linters emit.

mod span;

pub use span::{MAX_TEXT_LEN, Position, Span, to_offset};
