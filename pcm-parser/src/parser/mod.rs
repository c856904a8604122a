use std::path::Path;

use crate::decode::Decoded;
use crate::error::ParseError;

pub mod pcm;

pub trait ParserProvider {
    fn get_parser(&self) -> Box<dyn Parser>;
}

pub trait Parser {
    fn parse(&self) -> Result<Decoded, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Pcm,
}

pub fn get_extension(extension: &str) -> Option<Extension> {
    match extension.to_ascii_lowercase().as_str() {
        "pcm" => Some(Extension::Pcm),
        _ => None,
    }
}

pub fn path_extension(path: &Path) -> Option<Extension> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(get_extension)
}
