//! Bulk find and replace driven by a rules file.
//!
//! # Table of contents
//! * [Description](#description)
//! * [Rules file](#rules-file)
//! * [Modes](#modes)
//! * [CLI tool](#cli-tool)
//! * [Feature flags](#feature-flags)
//!
//! # Description
//!
//! Takes a text and a set of rules, each rule being a list of search terms and a single
//! replacement. Every occurrence of any of the terms is replaced. Rules are applied one after
//! another from top to bottom, each one working on the output of the previous.
//!
//! ```rust
//! use rulesub::{Options, RuleSet};
//!
//! let rules = RuleSet::from_rules("'|\"|54\nfox|dog", &Options::default())
//!     .expect("rules did not compile");
//!
//! assert_eq!(
//!     rules.apply("The 'quick' \"brown\" fox."),
//!     "The 54quick54 54brown54 dog."
//! );
//! ```
//!
//! # Rules file
//!
//! One rule per line. Fields are separated by delimiter (`|` by default, see
//! [`Options::delimiter`]). The last field is the replacement, all fields before it are search
//! terms:
//!
//! ```text
//! 1|2|3|4|9
//! ```
//!
//! replaces all instances of 1, 2, 3 and 4 with 9. Delimiter can be escaped with a backslash to be
//! searched for: `\||2` replaces every `|` with `2`. Replacement field is never unescaped. A line
//! without delimiter does nothing, empty search terms are ignored.
//!
//! # Modes
//!
//! * [`Mode::Literal`] (default) searches for exact text, regex metacharacters included
//! * [`Mode::Regex`] treats terms as regex patterns. Replacement may reference groups with
//!   backslashes: `\1` or `\g<1>` is entire match, `\2` onwards (or `\g<2>`) are capture groups
//!   of the matching term and `\g<name>` is a named group. `\n`, `\t` and `\\` are unescaped,
//!   `$` is plain text
//!
//! When several terms match at the same position the one listed first wins.
//!
//! # CLI tool
//!
//! You can run CLI tool by enabling `cli` feature: `cargo run --features=cli -- --help`.
//!
//! `cargo run --features=cli -- -f content.txt rules.txt out.txt` writes replaced `content.txt` into
//! `out.txt`. Options can also be loaded from ron file with `--config`.
//!
//! # Feature flags
//!
//! Name | Description | Default?
//! ---|---|---
//! `deserialize` | enables deserialization for [`Options`] | yes
//! `cli` | required to run CLI tool | no

mod file;
mod options;
mod pass;
mod rule;
mod ruleset;
mod template;

pub use file::{replace_from_file, Error, DEFAULT_OUTPUT};
pub use options::{Mode, Options};
pub use pass::{replace, CreationError, Pass, SearchTerms};
pub use rule::{parse_rules, Rule};
pub use ruleset::{CreationError as RuleSetError, RuleSet};
pub use template::TemplateError;
