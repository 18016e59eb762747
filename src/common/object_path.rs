//! `s3://bucket/key` object references.

use crate::common::error::{PipelineError, PipelineResult};

pub const STORAGE_SCHEME: &str = "s3://";

pub fn object_uri(bucket: &str, key: &str) -> String {
    format!("{}{}/{}", STORAGE_SCHEME, bucket, key)
}

/// Splits an absolute object reference into `(bucket, key)`.
pub fn split_object_uri(uri: &str) -> PipelineResult<(&str, &str)> {
    let rest = uri
        .strip_prefix(STORAGE_SCHEME)
        .ok_or_else(|| PipelineError::malformed_output_path(uri))?;

    match rest.split_once('/') {
        Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok((bucket, key)),
        _ => Err(PipelineError::malformed_output_path(uri)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_splits_object_references() {
        let uri = object_uri("dest", "GUID123/AppleHLS1/movie.m3u8");
        assert_eq!(uri, "s3://dest/GUID123/AppleHLS1/movie.m3u8");
        assert_eq!(split_object_uri(&uri).unwrap(), ("dest", "GUID123/AppleHLS1/movie.m3u8"));
    }

    #[test]
    fn rejects_references_without_scheme_bucket_or_key() {
        for bad in ["dest/GUID123/x.m3u8", "https://dest/x.m3u8", "s3://dest", "s3://dest/", "s3:///x"] {
            assert!(
                matches!(split_object_uri(bad), Err(PipelineError::MalformedOutputPath(_))),
                "{bad} should be rejected"
            );
        }
    }
}
