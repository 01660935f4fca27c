use std::{borrow::Cow, error::Error, fmt};

use regex_automata::{
    meta::{BuildError, Regex},
    util::syntax,
};

use crate::{
    options::{Mode, Options},
    rule::Rule,
    template::{Template, TemplateError},
};

/// Anything that can be used as a list of search terms: a single string or a sequence of them
pub trait SearchTerms {
    fn terms(&self) -> Vec<&str>;
}

impl SearchTerms for str {
    fn terms(&self) -> Vec<&str> {
        vec![self]
    }
}

impl SearchTerms for String {
    fn terms(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl<T: AsRef<str>> SearchTerms for [T] {
    fn terms(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<T: AsRef<str>, const N: usize> SearchTerms for [T; N] {
    fn terms(&self) -> Vec<&str> {
        self.as_slice().terms()
    }
}

impl<T: AsRef<str>> SearchTerms for Vec<T> {
    fn terms(&self) -> Vec<&str> {
        self.as_slice().terms()
    }
}

/// A group of search terms with their patterns combined into one, sharing single replacement
#[derive(Clone)]
pub struct Pass {
    terms: Vec<String>,
    replacement: String,
    mode: Mode,
    // only set in regex mode
    template: Option<Template>,
    // None when there is nothing to search for
    multi_regex: Option<Regex>,
}

// skips 20 pages of debug output of `multi_regex` field
#[allow(clippy::missing_fields_in_debug)]
impl fmt::Debug for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pass")
            .field("terms", &self.terms)
            .field("replacement", &self.replacement)
            .field("mode", &self.mode)
            .finish()
    }
}

impl Pass {
    /// Compiles terms into a single leftmost-first alternation.
    ///
    /// In [`Mode::Literal`] every term is escaped and replacement is inserted verbatim. In
    /// [`Mode::Regex`] terms are used as is and replacement may reference groups: `\1` is entire
    /// match, `\2` onwards are groups of the matching term, `\g<name>` is a named group. Empty
    /// terms are skipped because they would match at every position
    #[allow(clippy::result_large_err)]
    pub fn new<T: SearchTerms + ?Sized>(
        terms: &T,
        replacement: impl Into<String>,
        options: &Options,
    ) -> Result<Self, CreationError> {
        let replacement = replacement.into();

        let template = match options.mode {
            Mode::Literal => None,
            Mode::Regex => {
                Some(Template::parse(&replacement).map_err(CreationError::BadTemplate)?)
            }
        };

        let terms: Vec<String> = terms
            .terms()
            .into_iter()
            .filter(|term| {
                if term.is_empty() {
                    log::warn!("skipping empty search term");
                }
                !term.is_empty()
            })
            .map(str::to_owned)
            .collect();

        let multi_regex = if terms.is_empty() {
            None
        } else {
            let patterns: Vec<Cow<'_, str>> = terms
                .iter()
                .map(|term| match options.mode {
                    Mode::Literal => Cow::Owned(regex_syntax::escape(term)),
                    Mode::Regex => Cow::Borrowed(term.as_str()),
                })
                .collect();

            // patterns listed first win on the same position, same as `(a|b|c)`
            let regex = Regex::builder()
                .syntax(syntax::Config::new().case_insensitive(options.ignore_case))
                .build_many(&patterns)
                .map_err(CreationError::BadRegex)?;

            if let Some(template) = &template {
                template
                    .check(regex.group_info())
                    .map_err(CreationError::BadTemplate)?;
            }

            Some(regex)
        };

        Ok(Self {
            terms,
            replacement,
            mode: options.mode,
            template,
            multi_regex,
        })
    }

    #[allow(clippy::result_large_err)]
    pub fn from_rule(rule: &Rule, options: &Options) -> Result<Self, CreationError> {
        Self::new(&rule.terms, rule.replacement.as_str(), options)
    }

    /// Search terms left after dropping empty ones
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Produces string with all non-overlapping matches of any term replaced.
    ///
    /// Returns original text untouched when nothing matched
    #[must_use]
    pub fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let Some(multi_regex) = &self.multi_regex else {
            return text;
        };

        let input = text.as_ref();

        let mut output = String::with_capacity(input.len());
        let mut last_replacement = 0;
        let mut replaced = 0_usize;

        match &self.template {
            None => {
                for found in multi_regex.find_iter(input) {
                    output.push_str(&input[last_replacement..found.start()]);
                    output.push_str(&self.replacement);

                    last_replacement = found.end();
                    replaced += 1;
                }
            }
            Some(template) => {
                for captures in multi_regex.captures_iter(input) {
                    let Some(found) = captures.get_match() else {
                        continue;
                    };

                    output.push_str(&input[last_replacement..found.start()]);
                    template.expand(&captures, input, &mut output);

                    last_replacement = found.end();
                    replaced += 1;
                }
            }
        }

        log::trace!("{:?} -> {:?}: {replaced} replaced", self.terms, self.replacement);

        if replaced == 0 {
            return text;
        }

        output.push_str(&input[last_replacement..]);

        Cow::Owned(output)
    }
}

/// Replaces every occurrence of any of `terms` in `text` with `replacement`.
///
/// An empty list of terms leaves text unchanged
///
/// ```
/// use rulesub::{replace, Mode};
///
/// let text = "The 'quick' \"brown\" fox.";
///
/// assert_eq!(
///     replace(text, &["'", "\""], "54", Mode::Literal).unwrap(),
///     "The 54quick54 54brown54 fox."
/// );
/// assert_eq!(replace(text, "'", "", Mode::Literal).unwrap(), "The quick \"brown\" fox.");
/// ```
#[allow(clippy::result_large_err)]
pub fn replace<T: SearchTerms + ?Sized>(
    text: &str,
    terms: &T,
    replacement: &str,
    mode: Mode,
) -> Result<String, CreationError> {
    let options = Options {
        mode,
        ..Default::default()
    };

    Ok(Pass::new(terms, replacement, &options)?
        .apply(Cow::Borrowed(text))
        .into_owned())
}

#[derive(Debug)]
pub enum CreationError {
    BadRegex(BuildError),
    BadTemplate(TemplateError),
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationError::BadRegex(err) => {
                let mut msg = err.to_string();
                if let Some(syntax_msg) = err.syntax_error() {
                    msg = format!("{msg}: {syntax_msg}");
                }

                write!(f, "regex combination failed: {msg}")
            }
            CreationError::BadTemplate(err) => write!(f, "bad replacement: {err}"),
        }
    }
}

impl Error for CreationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CreationError::BadRegex(err) => Some(err),
            CreationError::BadTemplate(err) => Some(err),
        }
    }
}
