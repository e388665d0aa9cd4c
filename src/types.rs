use clap::ValueEnum;
use std::collections::BTreeSet;

/// Event codes extracted when no usable `--codes` value is given.
/// 401 is "show text", 402 is "show choices".
pub const DEFAULT_CODES: [i64; 2] = [401, 402];

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
/// Translation table layout
pub enum TableSchema {
    /// file,source
    Source,
    /// file,source,target
    Apply,
    /// file,name,code,idx,indent,source,target
    Full,
    /// source,target
    Pairs,
}

impl TableSchema {
    /// Header row written before any data row.
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            TableSchema::Source => &["file", "source"],
            TableSchema::Apply => &["file", "source", "target"],
            TableSchema::Full => &[
                "file", "name", "code", "idx", "indent", "source", "target",
            ],
            TableSchema::Pairs => &["source", "target"],
        }
    }

    /// Whether rows are keyed and sorted by source text alone instead of by position.
    pub fn is_file_agnostic(&self) -> bool {
        matches!(self, TableSchema::Pairs)
    }

    pub fn default_mode(&self) -> ExtractMode {
        match self {
            TableSchema::Pairs => ExtractMode::All,
            _ => ExtractMode::First,
        }
    }

    pub fn default_output(&self) -> &'static str {
        match self {
            TableSchema::Pairs => "translation.csv",
            _ => "rpgm_texts.csv",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
/// How strings are taken from a matching command's parameters
pub enum ExtractMode {
    /// Only the first parameter, if it is a string
    First,
    /// Every string anywhere inside the parameters
    All,
}

/// Options handed to every asset script.
#[derive(Clone, Debug)]
pub struct ExtraConfig {
    pub codes: BTreeSet<i64>,
    pub mode: ExtractMode,
    /// Turn newlines, tabs and backslashes into visible escapes.
    pub escape: bool,
    /// Minimum length (in characters, after trimming) of an extracted string.
    pub min_len: usize,
}

impl Default for ExtraConfig {
    fn default() -> Self {
        Self {
            codes: DEFAULT_CODES.into_iter().collect(),
            mode: ExtractMode::First,
            escape: true,
            min_len: 1,
        }
    }
}

/// Options for writing a translation table.
#[derive(Clone, Copy, Debug)]
pub struct ExportOptions {
    pub schema: TableSchema,
    pub dedupe: bool,
    /// Fill the target column with a copy of the source.
    pub identity: bool,
}

/// One extracted translatable string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextUnit {
    pub file: String,
    pub name: String,
    pub code: i64,
    pub idx: usize,
    pub indent: String,
    pub source: String,
    pub target: String,
}

/// Parses a comma separated list of event codes.
///
/// Tokens that are not plain decimal digits are ignored. An empty result
/// falls back to [`DEFAULT_CODES`].
pub fn parse_codes(s: &str) -> BTreeSet<i64> {
    let codes: BTreeSet<i64> = s
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|t| t.parse().ok())
        .collect();
    if codes.is_empty() {
        DEFAULT_CODES.into_iter().collect()
    } else {
        codes
    }
}

#[test]
fn test_parse_codes() {
    let set = |v: &[i64]| v.iter().copied().collect::<BTreeSet<i64>>();
    assert_eq!(parse_codes("401"), set(&[401]));
    assert_eq!(parse_codes(" 101, 401 ,x,-5,,402"), set(&[101, 401, 402]));
    assert_eq!(parse_codes(""), set(&[401, 402]));
    assert_eq!(parse_codes("abc"), set(&DEFAULT_CODES));
}
