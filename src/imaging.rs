//! Image payload helpers: data URIs and format sniffing
//!
//! Items carry their photo as a self-describing data URI so the stored
//! snapshot stays a single JSON file. The Gemini API wants bare base64
//! with a separate mime type, so both directions live here.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static DATA_URI_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/(png|jpeg|jpg|webp);base64,").expect("valid regex"));

/// Strip the data-URI prefix, leaving the bare base64 payload.
/// Strings without a recognized prefix pass through unchanged.
pub fn base64_payload(data_uri: &str) -> &str {
    match DATA_URI_PREFIX.find(data_uri) {
        Some(m) => &data_uri[m.end()..],
        None => data_uri,
    }
}

/// Read an image file and encode it as a data URI.
///
/// The format is sniffed from the file contents, not the extension;
/// anything that is not a recognizable image is rejected here, before
/// any network call.
pub fn encode_image_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file {}", path.display()))?;
    let format = image::guess_format(&bytes)
        .with_context(|| format!("{} is not a recognized image", path.display()))?;
    let mime = match format {
        image::ImageFormat::Png => "image/png",
        image::ImageFormat::Jpeg => "image/jpeg",
        image::ImageFormat::WebP => "image/webp",
        other => bail!("Unsupported image format {:?} (use png, jpeg, or webp)", other),
    };
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(&bytes)))
}

/// Decode a `data:<mime>;base64,<payload>` URI into its mime type and bytes
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:").context("Not a data URI")?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .context("Data URI is not base64-encoded")?;
    let bytes = BASE64.decode(payload).context("Invalid base64 in data URI")?;
    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_payload_strips_known_prefixes() {
        assert_eq!(base64_payload("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(base64_payload("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(base64_payload("data:image/webp;base64,xyz"), "xyz");
    }

    #[test]
    fn test_base64_payload_passes_through_bare_payloads() {
        assert_eq!(base64_payload("QUJD"), "QUJD");
        assert_eq!(base64_payload("data:text/plain;base64,QUJD"), "data:text/plain;base64,QUJD");
    }

    #[test]
    fn test_decode_data_uri_round_trip() {
        let uri = format!("data:image/png;base64,{}", BASE64.encode(b"fakepng"));
        let (mime, bytes) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"fakepng");
    }

    #[test]
    fn test_decode_rejects_non_data_uri() {
        assert!(decode_data_uri("https://example.com/a.png").is_err());
        assert!(decode_data_uri("data:image/png,plain").is_err());
    }

    #[test]
    fn test_encode_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "just text").unwrap();
        assert!(encode_image_file(&path).is_err());
    }

    #[test]
    fn test_encode_sniffs_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        // 1x1 transparent PNG
        let png = BASE64
            .decode("iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==")
            .unwrap();
        std::fs::write(&path, &png).unwrap();
        let uri = encode_image_file(&path).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }
}
