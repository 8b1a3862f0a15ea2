//! Document model types.
//!
//! Everything here is produced once by the parser and never mutated
//! afterward; each object owns its own payload state and text runs.

mod document;
mod object;
mod page;
mod text;

pub use document::Document;
pub use object::{ByteRange, ObjectType, PdfObject, StreamKind};
pub use page::{Page, Rect};
pub use text::{FontDirective, TextBlock};
