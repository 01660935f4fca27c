use std::{borrow::Cow, error::Error, fmt};

use crate::{
    options::Options,
    pass::{self, Pass},
    rule::parse_rules,
};

/// Compiled rules file. Holds [`Pass`] objects and applies them in order
#[derive(Debug, Clone, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct RuleSet {
    passes: Vec<Pass>,
}

#[derive(Debug)]
pub enum CreationError {
    InvalidDelimiter(char),
    BadRule { line: usize, source: pass::CreationError },
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationError::InvalidDelimiter(delimiter) => {
                write!(f, "{delimiter:?} cannot be used as delimiter")
            }
            CreationError::BadRule { line, source } => write!(f, "rule at line {line}: {source}"),
        }
    }
}

impl Error for CreationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CreationError::InvalidDelimiter(_) => None,
            CreationError::BadRule { source, .. } => Some(source),
        }
    }
}

impl RuleSet {
    pub fn new(passes: Vec<Pass>) -> Self {
        Self { passes }
    }

    /// Compiles every line of rules file into a pass, keeping file order
    pub fn from_rules(rules: &str, options: &Options) -> Result<Self, CreationError> {
        if !options.delimiter_is_valid() {
            return Err(CreationError::InvalidDelimiter(options.delimiter));
        }

        let passes = parse_rules(rules, options.delimiter)
            .enumerate()
            .map(|(i, rule)| {
                Pass::from_rule(&rule, options)
                    .map_err(|source| CreationError::BadRule { line: i + 1, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("compiled {} rules in {:?} mode", passes.len(), options.mode);

        Ok(Self::new(passes))
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs all passes against text. Each pass sees output of previous ones
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.passes
            .iter()
            .fold(Cow::Borrowed(text), |text, pass| pass.apply(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Mode;

    fn literal(rules: &str) -> RuleSet {
        RuleSet::from_rules(rules, &Options::default()).unwrap()
    }

    #[test]
    fn applies_in_file_order() {
        let rules = literal("a|b\nb|c\n");

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.apply("ab"), "cc");

        let reversed = literal("b|c\na|b\n");
        assert_eq!(reversed.apply("ab"), "bc");
    }

    #[test]
    fn noop_lines_do_nothing() {
        let rules = literal("\njust replacement\n1|2|3|4|9\n");

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.apply("1 2 3 4 5"), "9 9 9 9 5");
    }

    #[test]
    fn empty_rules() {
        let rules = literal("");

        assert!(rules.is_empty());
        assert!(matches!(rules.apply("text"), Cow::Borrowed("text")));
    }

    #[test]
    fn escaped_delimiter_rule() {
        assert_eq!(literal("\\||2").apply("hi| fun| times|"), "hi2 fun2 times2");

        let tilde = Options {
            delimiter: '~',
            ..Default::default()
        };
        let rules = RuleSet::from_rules("\\~~2", &tilde).unwrap();
        assert_eq!(rules.apply("hi~ fun~ times~"), "hi2 fun2 times2");
    }

    #[test]
    fn regex_mode() {
        let options = Options {
            mode: Mode::Regex,
            ..Default::default()
        };
        let rules = RuleSet::from_rules(concat!(r"\s+| ", "\n", r"(\w+)@(\w+)|\3 at \2"), &options);

        assert_eq!(rules.unwrap().apply("me@home   now"), "home at me now");
    }

    #[test]
    fn regex_mode_keeps_dollar_replacement() {
        let options = Options {
            mode: Mode::Regex,
            ..Default::default()
        };
        let rules = RuleSet::from_rules("USD|$US\n\\d+|$5", &options).unwrap();

        assert_eq!(rules.apply("10 USD"), "$5 $US");
    }

    #[test]
    fn bad_rule_reports_line() {
        let options = Options {
            mode: Mode::Regex,
            ..Default::default()
        };
        let err = RuleSet::from_rules("a|b\n[z|c\n", &options).unwrap_err();

        assert!(matches!(err, CreationError::BadRule { line: 2, .. }));
        assert!(err.to_string().starts_with("rule at line 2: "));
    }

    #[test]
    fn invalid_delimiter() {
        let options = Options {
            delimiter: '\\',
            ..Default::default()
        };

        assert!(matches!(
            RuleSet::from_rules("a\\b", &options),
            Err(CreationError::InvalidDelimiter('\\'))
        ));
    }
}
