use std::{fs, path::PathBuf};

use crate::decode::{decode_named, DecodeMode, Decoded, ParseOptions};
use crate::error::ParseError;

use super::{Parser, ParserProvider};

pub struct PcmParserProvider {
    pub filenames: Vec<PathBuf>,
    pub options: ParseOptions,
}

impl ParserProvider for PcmParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(PcmParser {
            filenames: self.filenames.clone(),
            options: self.options,
        })
    }
}

/// Reads every file in order into a single map.
///
/// A reference id defined by an earlier file wins over the same id in a later
/// one. Issue line numbers are relative to the file they came from.
pub struct PcmParser {
    pub filenames: Vec<PathBuf>,
    pub options: ParseOptions,
}

impl Parser for PcmParser {
    fn parse(&self) -> Result<Decoded, ParseError> {
        let mut merged = Decoded::default();

        for path in &self.filenames {
            let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
                path: path.clone(),
                source,
            })?;
            let origin = path.display().to_string();

            let decoded = decode_named(&origin, &text, &self.options)?;
            log::debug!(
                "{origin}: {} references, {} points",
                decoded.map.references.len(),
                decoded.map.points.len()
            );

            let mut issues = decoded.issues;
            for id in merged.map.merge(decoded.map) {
                log::debug!("{origin}: reference '{id}' already defined by an earlier file");
            }

            if self.options.mode == DecodeMode::Lenient {
                for issue in &issues {
                    log::warn!("{origin}: {issue}");
                }
            }

            merged.issues.append(&mut issues);
            if merged.version.is_none() {
                merged.version = decoded.version;
            }
        }

        Ok(merged)
    }
}
