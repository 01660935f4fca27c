/// How search terms are interpreted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum Mode {
    /// Terms are matched as exact text, regex metacharacters included
    #[default]
    Literal,
    /// Terms are regex sub-patterns and replacement acts as capture template
    Regex,
}

/// Settings shared by rule parsing and pattern compilation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Options {
    /// Field separator of rule lines. Escaped with a backslash inside search terms
    pub delimiter: char,
    pub mode: Mode,
    pub ignore_case: bool,
}

impl Options {
    pub const DEFAULT_DELIMITER: char = '|';

    /// Backslash is the escape character and line breaks never reach the parser
    pub fn delimiter_is_valid(&self) -> bool {
        !matches!(self.delimiter, '\\' | '\n' | '\r')
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delimiter: Self::DEFAULT_DELIMITER,
            mode: Mode::Literal,
            ignore_case: false,
        }
    }
}
