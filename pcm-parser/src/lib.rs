pub mod decode;
pub mod error;
pub mod number;
pub mod parser;
pub mod tokenizer;

pub use decode::{decode_into, decode_str, DecodeMode, Decoded, ParseOptions};
pub use error::{IssueKind, LineIssue, ParseError};
