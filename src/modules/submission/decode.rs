//! Decoding of object references as delivered by storage events.

use crate::common::error::{PipelineError, PipelineResult};

/// Keys arrive form-encoded: `+` is a space and everything else is
/// percent-encoded, so `+` is replaced before percent-decoding. An encoded
/// plus (`%2B`) therefore survives as a literal `+`.
pub fn decode_object_key(raw: &str) -> PipelineResult<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| PipelineError::decode(raw, e))
}

pub fn decode_bucket_name(raw: &str) -> PipelineResult<String> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| PipelineError::decode(raw, e))
}
