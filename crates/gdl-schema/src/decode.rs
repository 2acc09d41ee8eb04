use gdl_store::Record;
use gdl_types::Document;

use crate::error::{DecodeError, DecodeResult};

/// Decoder for one dataset's document.
///
/// Implementations return records in document order; that order becomes the
/// store's decode order and therefore the tie-break for name lookups.
pub trait Decode: Record + Sized {
    /// Name of the root element this dataset's document must have.
    const ROOT: &'static str;

    /// Turn a parsed document into records.
    fn decode(doc: &Document) -> DecodeResult<Vec<Self>>;
}

/// Check that `doc` has the expected root element.
pub(crate) fn expect_root(doc: &Document, expected: &'static str) -> DecodeResult<()> {
    let found = doc.root().name();
    if found != expected {
        return Err(DecodeError::UnexpectedRoot {
            expected,
            found: found.to_string(),
        });
    }
    Ok(())
}
