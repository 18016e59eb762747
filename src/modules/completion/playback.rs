//! Playback URLs for finished outputs.

use super::dto::OutputGroupDetail;
use crate::common::error::{PipelineError, PipelineResult};
use crate::common::object_path::split_object_uri;

/// Swaps `s3://{bucket}/` for the public delivery domain:
/// `s3://dest/GUID123/x.m3u8` becomes `https://{domain}/GUID123/x.m3u8`.
pub fn build_playback_url(domain: &str, output_path: &str) -> PipelineResult<String> {
    let (_bucket, key) = split_object_uri(output_path)?;
    let domain = domain.trim_start_matches("https://").trim_end_matches('/');

    Ok(format!("https://{}/{}", domain, key))
}

/// One URL per output group, taken from the group's first playlist.
pub fn playback_urls(domain: &str, groups: &[OutputGroupDetail]) -> PipelineResult<Vec<String>> {
    groups
        .iter()
        .map(|group| {
            let manifest = group.playlist_file_paths.first().ok_or_else(|| {
                PipelineError::malformed_output_path("output group without playlist paths")
            })?;
            build_playback_url(domain, manifest)
        })
        .collect()
}
