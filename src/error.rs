use crate::schema::Violation;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The buffer is too short for the fixed container frame, or the length
    /// prefix runs past the end of the payload.
    MalformedInput(String),
    /// The ciphertext failed to decrypt to valid padded UTF-8 plaintext.
    Decryption(DecryptionCause),
    /// The decrypted JSON does not match the save file schema. Carries every
    /// violated field path, not just the first.
    Validation(Vec<Violation>),
    /// The decrypted text is not valid JSON at all (distinct from a schema
    /// mismatch), or some other JSON document failed to parse.
    Json(serde_json::Error),
    IoError(std::io::Error),
}

#[derive(Debug)]
pub enum DecryptionCause {
    Base64(base64::DecodeError),
    InvalidPadding,
    InvalidUtf8(std::string::FromUtf8Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::MalformedInput(ref msg) => write!(f, "malformed save file: {msg}"),
            Error::Decryption(ref cause) => write!(f, "failed to decrypt save file: {cause}"),
            Error::Validation(ref violations) => {
                write!(f, "save file failed validation ({} violation", violations.len())?;
                if violations.len() != 1 {
                    write!(f, "s")?;
                }
                write!(f, ")")
            }
            Error::Json(ref err) => write!(f, "{err}"),
            Error::IoError(ref err) => write!(f, "{err}"),
        }
    }
}

impl std::fmt::Display for DecryptionCause {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            DecryptionCause::Base64(ref err) => write!(f, "payload is not valid base64: {err}"),
            DecryptionCause::InvalidPadding => {
                write!(f, "invalid PKCS7 padding (wrong key or corrupted ciphertext)")
            }
            DecryptionCause::InvalidUtf8(ref err) => {
                write!(f, "plaintext is not valid UTF-8: {err}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Decryption(DecryptionCause::Base64(ref err)) => Some(err),
            Error::Decryption(DecryptionCause::InvalidUtf8(ref err)) => Some(err),
            Error::Json(ref err) => Some(err),
            Error::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<base64::DecodeError> for Error {
    fn from(error: base64::DecodeError) -> Error {
        Error::Decryption(DecryptionCause::Base64(error))
    }
}

impl std::convert::From<aes::cipher::block_padding::UnpadError> for Error {
    fn from(_: aes::cipher::block_padding::UnpadError) -> Error {
        Error::Decryption(DecryptionCause::InvalidPadding)
    }
}

impl std::convert::From<std::string::FromUtf8Error> for Error {
    fn from(error: std::string::FromUtf8Error) -> Error {
        Error::Decryption(DecryptionCause::InvalidUtf8(error))
    }
}

impl std::convert::From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::IoError(error)
    }
}
