use std::fmt::{Display, Formatter, Result};

use dat_file_parser::DatFileParserError;
use database::database_error::DatabaseError;
use http_downloader::DownloadError;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    DbError(String),
    DeserializationError(String),
    IoError(String),
    SettingsError(String),
    DownloadError(String),
    ParseError(String),
    CatalogImportError(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Error::DbError(message) => write!(f, "Database error: {}", message),
            Error::DeserializationError(message) => write!(f, "Deserialization error: {}", message),
            Error::IoError(message) => write!(f, "IO error: {}", message),
            Error::SettingsError(message) => write!(f, "Settings error: {}", message),
            Error::DownloadError(message) => write!(f, "Download error: {}", message),
            Error::ParseError(message) => write!(f, "Parse error: {}", message),
            Error::CatalogImportError(message) => write!(f, "Catalog import error: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl From<DatabaseError> for Error {
    fn from(err: DatabaseError) -> Self {
        Error::DbError(err.to_string())
    }
}

impl From<DownloadError> for Error {
    fn from(err: DownloadError) -> Self {
        Error::DownloadError(err.to_string())
    }
}

impl From<DatFileParserError> for Error {
    fn from(err: DatFileParserError) -> Self {
        Error::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::CatalogImportError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DeserializationError(err.to_string())
    }
}
