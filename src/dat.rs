//! Silksong `.dat` save container
//!
//! A save file on disk is a C# `BinaryFormatter` string record wrapping a
//! base64 payload:
//!
//! ```text
//! header                          00 01 00 00 00 ff ff ff ff
//!                                 01 00 00 00 00 00 00 00 06
//!                                 01 00 00 00               (22 bytes, fixed)
//! length prefix                   xx [xx xx xx xx]          (7-bit varint, 1-5 bytes)
//! payload                         xx xx xx ...              (base64 ASCII text)
//! terminator                      0b                        (1 byte)
//! ```
//!
//! The payload decodes to an AES-256-ECB ciphertext (PKCS7 padding) under a
//! fixed key shipped with the game. The plaintext is a UTF-8 JSON document.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::{engine::general_purpose, Engine as _};
use hex_literal::hex;

use crate::error::{Error, Result};

type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;
type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;

/// The fixed C# serialization header at the start of every save file.
pub const HEADER: [u8; 22] =
    hex!("00 01 00 00 00 ff ff ff ff 01 00 00 00 00 00 00 00 06 01 00 00 00");

/// `BinaryFormatter` record terminator (MessageEnd) at the end of the file.
const TERMINATOR: u8 = 0x0b;

/// The AES key used by Silksong to encrypt saves, 32 ASCII bytes.
const AES_KEY: [u8; 32] = *b"UKu52ePUBwetZ9wNX88o54dnfKRu0T1l";

/// How the caller should interpret a save file's bytes, chosen by extension.
///
/// `.json` files are already-decrypted save text (an escape hatch for
/// pre-decoded files); anything else is treated as the encrypted container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Dat,
    Json,
}

impl SaveFormat {
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> SaveFormat {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SaveFormat::Json,
            _ => SaveFormat::Dat,
        }
    }
}

/// Strip the container framing, leaving the base64 payload.
///
/// Drops the fixed header and the trailing terminator, then the 7-bit
/// length prefix: each prefix byte with the high bit set means another
/// follows, up to 5 bytes total, counting the terminating low byte.
pub fn unwrap_dat(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < HEADER.len() + 1 {
        return Err(Error::MalformedInput(format!(
            "file is {} bytes, shorter than the {}-byte container frame",
            bytes.len(),
            HEADER.len() + 1
        )));
    }

    let inner = &bytes[HEADER.len()..bytes.len() - 1];

    let mut prefix_len = 0;
    for i in 0..5 {
        prefix_len += 1;
        match inner.get(i) {
            Some(byte) if byte & 0x80 != 0 => continue,
            Some(_) => break,
            None => {
                return Err(Error::MalformedInput(
                    "length prefix runs past the end of the file".to_string(),
                ))
            }
        }
    }

    Ok(&inner[prefix_len..])
}

/// Decrypt an unwrapped payload into the plaintext JSON string.
///
/// The payload bytes are base64 ASCII text of the ciphertext. Wrong-key or
/// corrupted input shows up as a padding or UTF-8 failure; both surface as
/// [`Error::Decryption`] with the cause attached.
pub fn decrypt(payload: &[u8]) -> Result<String> {
    let mut ciphertext = general_purpose::STANDARD.decode(payload)?;
    let plaintext = Aes256EcbDec::new(&AES_KEY.into()).decrypt_padded_mut::<Pkcs7>(&mut ciphertext)?;
    Ok(String::from_utf8(plaintext.to_vec())?)
}

/// Decode a complete `.dat` save file into its plaintext JSON string.
pub fn decode_dat(bytes: &[u8]) -> Result<String> {
    let payload = unwrap_dat(bytes)?;
    decrypt(payload)
}

/// Encrypt plaintext JSON back into a complete `.dat` save file.
///
/// Inverse of [`decode_dat`]: encrypt, base64-encode, and re-apply the
/// container framing with the payload length as a 7-bit varint.
pub fn encode_dat(json: &str) -> Vec<u8> {
    let ciphertext =
        Aes256EcbEnc::new(&AES_KEY.into()).encrypt_padded_vec_mut::<Pkcs7>(json.as_bytes());
    let payload = general_purpose::STANDARD.encode(ciphertext);

    let mut out = Vec::with_capacity(HEADER.len() + 5 + payload.len() + 1);
    out.extend_from_slice(&HEADER);

    let mut remaining = payload.len();
    loop {
        let mut byte = (remaining & 0x7f) as u8;
        remaining >>= 7;
        if remaining != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if remaining == 0 {
            break;
        }
    }

    out.extend_from_slice(payload.as_bytes());
    out.push(TERMINATOR);
    out
}
