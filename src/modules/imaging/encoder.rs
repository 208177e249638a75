use std::io::Cursor;

use base64::prelude::*;
use image::codecs::jpeg::JpegEncoder;

use crate::shared::constants::{
    ARTIFACT_BUDGET_CHARS, ARTIFACT_DELIMITER, JPEG_QUALITY, THUMBNAIL_MAX_PX,
};

/// Result of packing a batch of images for one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifacts {
    /// Delimiter-joined base64 strings; empty when nothing was packed
    pub payload: String,
    /// Images packed into the payload
    pub accepted: usize,
    /// Images left out because the budget was reached
    pub skipped: usize,
}

impl EncodedArtifacts {
    pub fn empty() -> Self {
        Self {
            payload: String::new(),
            accepted: 0,
            skipped: 0,
        }
    }
}

/// Thumbnail, JPEG re-encode and base64 one image. Returns `None` for
/// unreadable input.
pub fn encode_one(data: &[u8]) -> Option<String> {
    let img = image::load_from_memory(data).ok()?;
    let img = img.thumbnail(THUMBNAIL_MAX_PX, THUMBNAIL_MAX_PX);

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        img.to_rgb8().write_with_encoder(encoder).ok()?;
    }

    Some(BASE64_STANDARD.encode(&buffer))
}

/// Encode a batch of uploads in order under the cumulative budget.
///
/// Unreadable files are dropped silently and never counted. Once adding an
/// image would exceed the budget, packing stops; that image and every
/// encodable image after it count as skipped, already-packed images are
/// kept.
pub fn encode_many(files: &[Vec<u8>]) -> EncodedArtifacts {
    pack(files.iter().map(|data| encode_one(data)).collect())
}

fn pack(encoded: Vec<Option<String>>) -> EncodedArtifacts {
    let mut artifacts = EncodedArtifacts::empty();
    let mut over_budget = false;

    // flatten drops unreadable files; they count neither way
    for item in encoded.into_iter().flatten() {
        if over_budget {
            artifacts.skipped += 1;
            continue;
        }
        let delimiter_len = usize::from(!artifacts.payload.is_empty());
        if artifacts.payload.len() + delimiter_len + item.len() > ARTIFACT_BUDGET_CHARS {
            over_budget = true;
            artifacts.skipped += 1;
            continue;
        }
        if delimiter_len > 0 {
            artifacts.payload.push(ARTIFACT_DELIMITER);
        }
        artifacts.payload.push_str(&item);
        artifacts.accepted += 1;
    }

    artifacts
}

/// Split a stored payload back into individual base64 images.
pub fn split_payload(payload: &str) -> Vec<String> {
    payload
        .split(ARTIFACT_DELIMITER)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
