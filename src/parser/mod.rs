//! PDF scanning module.
//!
//! Leaf first: [`lexer`] locates tokens, [`object`] carves indirect objects
//! out of the buffer, [`stream`] isolates and inflates stream payloads and
//! [`text`] decodes text-drawing scopes.

pub mod keywords;
pub mod lexer;
pub mod object;
mod options;
mod pdf_parser;
pub mod stream;
pub mod text;

pub use object::{ObjectLocator, SequentialProbe};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
pub use stream::ResolvedStream;
pub use text::{TextDecoder, TextScopes};
