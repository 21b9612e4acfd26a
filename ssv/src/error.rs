use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    SaveError(silksave::Error),
    IoError(std::io::Error),
    CliInputError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SaveError(err) => write!(f, "{}", err),
            Error::IoError(err) => write!(f, "IO error: {}", err),
            Error::CliInputError(msg) => write!(f, "CLI input error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::SaveError(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<silksave::Error> for Error {
    fn from(error: silksave::Error) -> Error {
        Error::SaveError(error)
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::IoError(error)
    }
}
