use std::{
    error, fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::{
    options::Options,
    ruleset::{self, RuleSet},
};

/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "test.txt";

#[derive(Debug)]
pub enum Error {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Rules(ruleset::CreationError),
}

impl Error {
    /// Content or rules file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read { path, source } => write!(f, "reading {}: {source}", path.display()),
            Error::Write { path, source } => write!(f, "writing {}: {source}", path.display()),
            Error::Rules(err) => write!(f, "parsing rules: {err}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Read { source, .. } | Error::Write { source, .. } => Some(source),
            Error::Rules(err) => Some(err),
        }
    }
}

impl From<ruleset::CreationError> for Error {
    fn from(err: ruleset::CreationError) -> Self {
        Self::Rules(err)
    }
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })
}

/// Applies every rule of `rules` file to `content` file and writes result to `output`.
///
/// Both files are read and rules are compiled before anything is written
pub fn replace_from_file(
    content: impl AsRef<Path>,
    rules: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &Options,
) -> Result<(), Error> {
    let content = content.as_ref();
    let output = output.as_ref();

    let text = read(content)?;
    let rules = RuleSet::from_rules(&read(rules.as_ref())?, options)?;

    let replaced = rules.apply(&text);

    fs::write(output, replaced.as_bytes()).map_err(|source| Error::Write {
        path: output.to_owned(),
        source,
    })?;

    log::debug!(
        "applied {} rules to {}, written to {}",
        rules.len(),
        content.display(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected() {
        let err = read(Path::new("fakefile.fff")).unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("reading fakefile.fff: "));
    }

    #[test]
    fn rule_errors_are_not_not_found() {
        let err = Error::from(ruleset::CreationError::InvalidDelimiter('\n'));

        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), r"parsing rules: '\n' cannot be used as delimiter");
    }
}
