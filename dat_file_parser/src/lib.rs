use regex::Regex;
use serde::Deserialize;
use std::fmt::Display;
use std::path::Path;
use std::sync::OnceLock;

pub trait DatFileParserOps: Send + Sync {
    fn parse_listing_file(&self, path: &Path) -> Result<Vec<ReferenceRecord>, DatFileParserError>;
}

pub struct DefaultDatParser;

impl DatFileParserOps for DefaultDatParser {
    fn parse_listing_file(&self, path: &Path) -> Result<Vec<ReferenceRecord>, DatFileParserError> {
        parse_listing_file(path)
    }
}

pub struct MockDatParser {
    parse_result: Result<Vec<ReferenceRecord>, DatFileParserError>,
}

impl MockDatParser {
    pub fn new(parse_result: Result<Vec<ReferenceRecord>, DatFileParserError>) -> Self {
        Self { parse_result }
    }
    pub fn set_parse_result(
        &mut self,
        parse_result: Result<Vec<ReferenceRecord>, DatFileParserError>,
    ) {
        self.parse_result = parse_result;
    }
}

impl DatFileParserOps for MockDatParser {
    fn parse_listing_file(&self, _path: &Path) -> Result<Vec<ReferenceRecord>, DatFileParserError> {
        self.parse_result.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatFileParserError {
    IoError(String),
    ParseError(String),
}

impl Display for DatFileParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatFileParserError::IoError(message) => write!(f, "IO error: {}", message),
            DatFileParserError::ParseError(message) => write!(f, "Parse error: {}", message),
        }
    }
}

/// One entry of a per-platform reference listing. For arcade sets `name` is
/// the short machine name ("aof3") and `description` the full title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub name: String,
    pub description: Option<String>,
}

impl ReferenceRecord {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description.filter(|d| !d.is_empty()),
        }
    }

    /// The name a listing considers standard for this entry.
    pub fn standard_name(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename = "datafile")]
struct LogiqxDatFile {
    #[serde(rename = "game", default)]
    games: Vec<LogiqxGame>,
}

#[derive(Debug, Deserialize)]
struct LogiqxGame {
    #[serde(rename = "@name")]
    name: String,
    #[serde(default)]
    description: Option<String>,
}

/// Parses a clrmamepro text listing:
///
/// ```text
/// game (
///     name "aof3"
///     description "Art of Fighting 3 - The Path of the Warrior"
/// )
/// ```
///
/// Blocks without a name are dropped, other block kinds are ignored.
pub fn parse_clrmamepro(content: &str) -> Vec<ReferenceRecord> {
    static NAME: OnceLock<Regex> = OnceLock::new();
    static DESCRIPTION: OnceLock<Regex> = OnceLock::new();
    let name_re = NAME.get_or_init(|| Regex::new(r#"^name\s+"(.*?)""#).unwrap());
    let description_re =
        DESCRIPTION.get_or_init(|| Regex::new(r#"^description\s+"(.*?)""#).unwrap());

    let mut records = Vec::new();
    let mut in_game = false;
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;

    for line in content.lines().map(str::trim) {
        if line.starts_with("game (") {
            in_game = true;
            name = None;
            description = None;
        } else if line.starts_with(')') {
            if in_game && let Some(name) = name.take() {
                records.push(ReferenceRecord::new(name, description.take()));
            }
            in_game = false;
        } else if in_game {
            if let Some(cap) = name_re.captures(line) {
                name = Some(cap[1].to_string());
            } else if let Some(cap) = description_re.captures(line) {
                description = Some(cap[1].to_string());
            }
        }
    }
    records
}

pub fn parse_logiqx(content: &str) -> Result<Vec<ReferenceRecord>, DatFileParserError> {
    let dat_file: LogiqxDatFile = quick_xml::de::from_str(content)
        .map_err(|e| DatFileParserError::ParseError(format!("Failed parsing XML listing: {}", e)))?;
    Ok(dat_file
        .games
        .into_iter()
        .map(|game| ReferenceRecord::new(game.name, game.description))
        .collect())
}

/// Parses listing bytes, picking the format from the first non-blank
/// character. Invalid UTF-8 is replaced rather than rejected.
pub fn parse_listing_bytes(bytes: &[u8]) -> Result<Vec<ReferenceRecord>, DatFileParserError> {
    let content = String::from_utf8_lossy(bytes);
    let content = content.trim_start_matches('\u{feff}');
    if content.trim_start().starts_with('<') {
        parse_logiqx(content)
    } else {
        Ok(parse_clrmamepro(content))
    }
}

pub fn parse_listing_file(path: &Path) -> Result<Vec<ReferenceRecord>, DatFileParserError> {
    let bytes = std::fs::read(path).map_err(|e| {
        DatFileParserError::IoError(format!("Failed opening path {:?}: {}", path, e))
    })?;
    parse_listing_bytes(&bytes).map_err(|err| match err {
        DatFileParserError::ParseError(message) => {
            DatFileParserError::ParseError(format!("{:?}: {}", path, message))
        }
        other => other,
    })
}
