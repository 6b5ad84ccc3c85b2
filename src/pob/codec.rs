//! Import codes: zlib-compressed build markup in URL-safe base64.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::error::{Error, Result};

const IMPORT_CODE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode an import code into build markup. Standard-alphabet codes
/// (`+`, `/`) are accepted as well.
pub fn decode_import_code(code: &str) -> Result<String> {
    let normalized: String = code
        .trim()
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(Error::ImportCode("import code is empty".to_string()));
    }

    let compressed = IMPORT_CODE.decode(normalized.as_bytes())?;

    let mut inflated = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|e| Error::ImportCode(format!("inflate failed: {e}")))?;

    String::from_utf8(inflated)
        .map_err(|e| Error::ImportCode(format!("decoded build is not UTF-8: {e}")))
}

/// Inverse of [`decode_import_code`].
pub fn encode_import_code(markup: &str) -> Result<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(markup.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(IMPORT_CODE.encode(compressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    const MARKUP: &str = r#"<PathOfBuilding><Build level="92" className="Witch"/></PathOfBuilding>"#;

    fn deflate(markup: &str) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(markup.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decode_url_safe_code() {
        let code = encode_import_code(MARKUP).unwrap();
        assert!(!code.contains('+') && !code.contains('/'));
        assert_eq!(decode_import_code(&code).unwrap(), MARKUP);
    }

    #[test]
    fn test_decode_standard_alphabet_with_padding() {
        let code = STANDARD.encode(deflate(MARKUP));
        assert_eq!(decode_import_code(&format!("  {code}\n")).unwrap(), MARKUP);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            decode_import_code("!!!not base64!!!"),
            Err(Error::ImportCode(_))
        ));
        // valid base64, not zlib
        assert!(matches!(
            decode_import_code("aGVsbG8gd29ybGQ"),
            Err(Error::ImportCode(_))
        ));
        assert!(matches!(decode_import_code("   "), Err(Error::ImportCode(_))));
    }
}
