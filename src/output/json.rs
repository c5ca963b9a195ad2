//! JSON output of a collection.

use crate::error::CollectResult;
use crate::models::Collection;
use std::io::Write;

/// Serialize a collection, pretty printed or compact.
pub fn to_json_string(collection: &Collection, pretty: bool) -> CollectResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(collection)?
    } else {
        serde_json::to_string(collection)?
    };
    Ok(json)
}

/// Write a collection as pretty JSON followed by a newline.
pub fn write_json<W: Write>(mut out: W, collection: &Collection) -> CollectResult<()> {
    serde_json::to_writer_pretty(&mut out, collection)?;
    writeln!(out)?;
    Ok(())
}
