//! Source map serialization
//!
//! parcel_sourcemap keeps mappings in an internal buffer; this produces
//! the standard JSON form written next to the compiled stylesheet.

use parcel_sourcemap::SourceMap;
use serde::Serialize;

use super::CompileError;

#[derive(Serialize)]
struct SourceMapJson<'a> {
    version: u8,
    mappings: String,
    sources: &'a Vec<String>,
    #[serde(rename = "sourcesContent")]
    sources_content: &'a Vec<String>,
    names: &'a Vec<String>,
}

/// Serialize the finalized map to source map v3 JSON
pub(crate) fn serialize(source_map: &mut SourceMap) -> Result<String, CompileError> {
    let mut vlq = Vec::new();
    source_map
        .write_vlq(&mut vlq)
        .map_err(|e| CompileError::SourceMap {
            message: e.to_string(),
        })?;

    let mappings = String::from_utf8(vlq).map_err(|e| CompileError::SourceMap {
        message: e.to_string(),
    })?;

    let json = SourceMapJson {
        version: 3,
        mappings,
        sources: source_map.get_sources(),
        sources_content: source_map.get_sources_content(),
        names: source_map.get_names(),
    };

    serde_json::to_string(&json).map_err(|e| CompileError::SourceMap {
        message: e.to_string(),
    })
}
