const ESCAPE: char = '\\';

/// One line of rules file: search terms followed by replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub terms: Vec<String>,
    pub replacement: String,
}

impl Rule {
    pub fn new(terms: Vec<String>, replacement: String) -> Self {
        Self { terms, replacement }
    }

    /// Splits line on every delimiter that is not preceded by a backslash.
    ///
    /// Last field becomes replacement, the rest are search terms with escaped delimiters turned
    /// back into plain ones. Replacement is kept as is. A line without delimiters has no terms
    /// and replaces nothing
    pub fn parse(line: &str, delimiter: char) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut fields = split_unescaped(line, delimiter);

        // split always yields at least one field
        let replacement = fields.pop().unwrap_or_default();

        let escaped = format!("{ESCAPE}{delimiter}");
        let unescaped = delimiter.to_string();

        let terms = fields
            .into_iter()
            .map(|term| term.replace(&escaped, &unescaped))
            .collect();

        Self { terms, replacement }
    }

    /// Rule without search terms
    pub fn is_noop(&self) -> bool {
        self.terms.is_empty()
    }
}

fn split_unescaped(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::with_capacity(line.len());
    let mut escaped = false;

    for c in line.chars() {
        if c == delimiter && !escaped {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }

        escaped = c == ESCAPE;
    }

    fields.push(current);

    fields
}

/// Parses every line of rules file in order
pub fn parse_rules(rules: &str, delimiter: char) -> impl Iterator<Item = Rule> + '_ {
    rules.lines().map(move |line| Rule::parse(line, delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(terms: &[&str], replacement: &str) -> Rule {
        Rule::new(
            terms.iter().map(|t| t.to_string()).collect(),
            replacement.to_string(),
        )
    }

    #[test]
    fn last_field_is_replacement() {
        assert_eq!(Rule::parse("1|2|3|4|9", '|'), rule(&["1", "2", "3", "4"], "9"));
    }

    #[test]
    fn strips_line_ending() {
        assert_eq!(Rule::parse("a|b\n", '|'), rule(&["a"], "b"));
        assert_eq!(Rule::parse("a|b\r\n", '|'), rule(&["a"], "b"));
    }

    #[test]
    fn replacement_only_has_no_terms() {
        let parsed = Rule::parse("lonely", '|');

        assert!(parsed.is_noop());
        assert_eq!(parsed.replacement, "lonely");
        assert!(Rule::parse("", '|').is_noop());
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(Rule::parse("a||", '|'), rule(&["a", ""], ""));
        assert_eq!(Rule::parse("|x", '|'), rule(&[""], "x"));
    }

    #[test]
    fn escaped_delimiter_is_unescaped_in_terms() {
        assert_eq!(Rule::parse(r"\||2", '|'), rule(&["|"], "2"));
        assert_eq!(
            Rule::parse(r"hi\| fun\| times\||2", '|'),
            rule(&["hi| fun| times|"], "2")
        );
    }

    #[test]
    fn escaped_delimiter_is_kept_in_replacement() {
        assert_eq!(Rule::parse(r"a|b\|c", '|'), rule(&["a"], r"b\|c"));
    }

    #[test]
    fn other_backslashes_untouched() {
        assert_eq!(Rule::parse(r"\d+|\w|n", '|'), rule(&[r"\d+", r"\w"], "n"));
    }

    #[test]
    fn double_backslash_still_escapes() {
        // only the directly preceding character is checked
        assert_eq!(Rule::parse(r"a\\|b", '|'), rule(&[], r"a\\|b"));
    }

    #[test]
    fn custom_delimiter() {
        assert_eq!(Rule::parse("a~b|c~d", '~'), rule(&["a", "b|c"], "d"));
        assert_eq!(Rule::parse(r"x\~y~z", '~'), rule(&["x~y"], "z"));
    }

    #[test]
    fn multibyte_delimiter() {
        assert_eq!(Rule::parse("кот→пёс→зверь", '→'), rule(&["кот", "пёс"], "зверь"));
    }

    #[test]
    fn parses_lines_in_order() {
        let rules: Vec<_> = parse_rules("a|b\n\nc|d|e\n", '|').collect();

        assert_eq!(rules, vec![rule(&["a"], "b"), rule(&[], ""), rule(&["c", "d"], "e")]);
    }
}
