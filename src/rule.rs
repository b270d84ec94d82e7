//! This module contains the matching rules from which every grammar in this
//! crate is built.  A [`Rule`] is an immutable value which, given some input
//! text, either matches a prefix of it or does not.  Rules are composed with
//! the constructors in this module, which mirror the ABNF operators:
//! terminal values, concatenation, ordered alternation and bounded
//! repetition.
//!
//! Matching is greedy and never backtracks.  Once a sub-rule has matched,
//! the enclosing rule keeps that match even if a later sibling fails.
//! Grammars must therefore be written so that each sub-rule's match length
//! is unambiguous at its position.

use std::sync::Arc;

/// This is the successful outcome of applying a [`Rule`] to some input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Match<'a> {
    /// The prefix of the input matched by the rule, verbatim.
    pub consumed: &'a str,

    /// The part of the input which follows the matched prefix.
    pub remainder: &'a str,
}

#[derive(Debug)]
enum Node {
    Terminal(char),
    Concatenate(Vec<Rule>),
    Alternatives(Vec<Rule>),
    Repetition {
        rule: Rule,
        min: usize,
        max: Option<usize>,
    },
}

/// A rule matches a prefix of its input or fails.  Rules hold no state
/// other than their sub-rules, so a single rule may be shared freely
/// between threads and reused for any number of inputs.  Cloning a rule is
/// cheap; clones share the same underlying grammar.
#[derive(Clone, Debug)]
pub struct Rule(Arc<Node>);

impl Rule {
    fn new(node: Node) -> Self {
        Self(Arc::new(node))
    }

    /// Apply the rule to the beginning of the given input.  On success the
    /// returned [`Match`] splits the input into the matched prefix and the
    /// remainder.
    #[must_use]
    pub fn parse<'a>(
        &self,
        input: &'a str,
    ) -> Option<Match<'a>> {
        self.match_len(input).map(|len| Match {
            consumed: &input[..len],
            remainder: &input[len..],
        })
    }

    // Returns the number of bytes of `input` matched by the rule.
    fn match_len(
        &self,
        input: &str,
    ) -> Option<usize> {
        match &*self.0 {
            Node::Terminal(value) => match input.chars().next() {
                Some(first) if first == *value => Some(first.len_utf8()),
                _ => None,
            },
            Node::Concatenate(rules) => {
                let mut consumed = 0;
                for rule in rules {
                    consumed += rule.match_len(&input[consumed..])?;
                }
                Some(consumed)
            },
            Node::Alternatives(rules) => {
                rules.iter().find_map(|rule| rule.match_len(input))
            },
            Node::Repetition {
                rule,
                min,
                max,
            } => {
                if max.map_or(false, |max| *min > max) {
                    return None;
                }
                let mut consumed = 0;
                let mut count = 0;
                while max.map_or(true, |max| count < max) {
                    match rule.match_len(&input[consumed..]) {
                        // Every further iteration would match empty too,
                        // so all remaining iterations are satisfied.
                        Some(0) => return Some(consumed),
                        Some(len) => {
                            consumed += len;
                            count += 1;
                        },
                        None => break,
                    }
                }
                if count >= *min {
                    Some(consumed)
                } else {
                    None
                }
            },
        }
    }
}

impl From<char> for Rule {
    fn from(value: char) -> Self {
        terminal(value)
    }
}

impl From<&str> for Rule {
    fn from(text: &str) -> Self {
        literal(text)
    }
}

impl From<(char, char)> for Rule {
    fn from((from, to): (char, char)) -> Self {
        range_alternatives(from, to)
    }
}

impl From<&Rule> for Rule {
    fn from(rule: &Rule) -> Self {
        rule.clone()
    }
}

/// A rule wrapped by [`end`] so that it only matches its entire input.
/// This is the form in which grammars are applied to complete header field
/// values.
#[derive(Clone, Debug)]
pub struct Anchored(Rule);

impl Anchored {
    /// Apply the wrapped rule to the given input, returning the matched text
    /// only if the rule matched all of it.
    #[must_use]
    pub fn parse<'a>(
        &self,
        input: &'a str,
    ) -> Option<&'a str> {
        match self.0.parse(input) {
            Some(Match {
                consumed,
                remainder,
            }) if remainder.is_empty() => Some(consumed),
            _ => None,
        }
    }

    /// Get the rule which this anchor wraps.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.0
    }
}

/// Build a rule which matches exactly one occurrence of the given code
/// point.
#[must_use]
pub fn terminal(value: char) -> Rule {
    Rule::new(Node::Terminal(value))
}

/// Build a rule which matches each of the given rules in turn, each one
/// applied to whatever the previous one left over.  With no rules at all,
/// the result matches the empty prefix of any input.
#[must_use]
pub fn concatenate<I>(rules: I) -> Rule
where
    I: IntoIterator,
    I::Item: Into<Rule>,
{
    Rule::new(Node::Concatenate(rules.into_iter().map(Into::into).collect()))
}

/// Build a rule which matches the given text exactly, code point by code
/// point.  The comparison is case-sensitive.
#[must_use]
pub fn literal(text: &str) -> Rule {
    concatenate(text.chars().map(terminal))
}

/// Build a rule which tries each of the given rules in order against the
/// same input, and takes the first one that matches.  Later rules are not
/// consulted once one has matched, even if they would have matched more.
/// With no rules at all, the result never matches.
#[must_use]
pub fn alternatives<I>(rules: I) -> Rule
where
    I: IntoIterator,
    I::Item: Into<Rule>,
{
    Rule::new(Node::Alternatives(rules.into_iter().map(Into::into).collect()))
}

/// Build a rule which matches any single code point in the inclusive range
/// from `from` to `to`.
#[must_use]
pub fn range_alternatives(
    from: char,
    to: char,
) -> Rule {
    alternatives((from..=to).map(terminal))
}

/// Build a rule which matches the given rule as many times as it can, up to
/// `max` times (`None` for no limit), and fails unless it matched at least
/// `min` times.  A repetition whose `min` exceeds its `max` can never be
/// satisfied, and so never matches.
#[must_use]
pub fn repetition<R>(
    rule: R,
    min: usize,
    max: Option<usize>,
) -> Rule
where
    R: Into<Rule>,
{
    Rule::new(Node::Repetition {
        rule: rule.into(),
        min,
        max,
    })
}

/// Build a rule which matches the given rule once, or matches nothing if the
/// given rule doesn't match.
#[must_use]
pub fn optional<R>(rule: R) -> Rule
where
    R: Into<Rule>,
{
    repetition(rule, 0, Some(1))
}

/// Anchor the given rule so that it must match its entire input.
#[must_use]
pub fn end<R>(rule: R) -> Anchored
where
    R: Into<Rule>,
{
    Anchored(rule.into())
}

/// Build a [`concatenate`] rule from any mix of rules, characters, literal
/// strings and `(from, to)` character ranges.
#[macro_export]
macro_rules! concatenate {
    ($($rule:expr),* $(,)?) => {{
        let rules: ::std::vec::Vec<$crate::Rule> =
            ::std::vec![$($crate::Rule::from($rule)),*];
        $crate::concatenate(rules)
    }};
}

/// Build an [`alternatives`] rule from any mix of rules, characters, literal
/// strings and `(from, to)` character ranges.
#[macro_export]
macro_rules! alternatives {
    ($($rule:expr),* $(,)?) => {{
        let rules: ::std::vec::Vec<$crate::Rule> =
            ::std::vec![$($crate::Rule::from($rule)),*];
        $crate::alternatives(rules)
    }};
}

#[cfg(test)]
mod tests {

    use super::*;
    use proptest::prelude::*;

    fn matched<'a>(
        consumed: &'a str,
        remainder: &'a str,
    ) -> Option<Match<'a>> {
        Some(Match {
            consumed,
            remainder,
        })
    }

    #[test]
    fn terminal_matches_first_code_point_only() {
        let rule = terminal('a');
        assert_eq!(matched("a", ""), rule.parse("a"));
        assert_eq!(matched("a", "b"), rule.parse("ab"));
        assert_eq!(matched("a", "a"), rule.parse("aa"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("b"));
        assert_eq!(None, rule.parse("ba"));
    }

    #[test]
    fn terminal_non_ascii() {
        let rule = terminal('\u{e9}');
        assert_eq!(matched("\u{e9}", "t\u{e9}"), rule.parse("\u{e9}t\u{e9}"));
        assert_eq!(None, rule.parse("e"));
    }

    #[test]
    fn concatenate_in_order() {
        let rule = concatenate!['a', 'b', 'c'];
        assert_eq!(matched("abc", ""), rule.parse("abc"));
        assert_eq!(matched("abc", "d"), rule.parse("abcd"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("ab"));
        assert_eq!(None, rule.parse("bcd"));
    }

    #[test]
    fn deep_concatenate() {
        let rule = concatenate![
            'a',
            concatenate![],
            concatenate!['b', 'c'],
            concatenate!['d', 'e', concatenate!['f', 'g']],
        ];
        assert_eq!(matched("abcdefg", ""), rule.parse("abcdefg"));
        assert_eq!(matched("abcdefg", "h"), rule.parse("abcdefgh"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("abc"));
        assert_eq!(None, rule.parse("bcd"));
    }

    #[test]
    fn empty_concatenate_is_identity() {
        let rule = concatenate![];
        assert_eq!(matched("", ""), rule.parse(""));
        assert_eq!(matched("", "abc"), rule.parse("abc"));
    }

    #[test]
    fn literal_is_case_sensitive() {
        let rule = literal("abc");
        assert_eq!(matched("abc", ""), rule.parse("abc"));
        assert_eq!(matched("abc", "d"), rule.parse("abcd"));
        assert_eq!(None, rule.parse("Abc"));
        assert_eq!(None, rule.parse("abC"));
        assert_eq!(None, rule.parse("ab"));
        assert_eq!(None, rule.parse(""));
    }

    #[test]
    fn empty_literal() {
        let rule = literal("");
        assert_eq!(matched("", ""), rule.parse(""));
        assert_eq!(matched("", "abc"), rule.parse("abc"));
    }

    #[test]
    fn mixed_concatenate() {
        let rule = concatenate!["ab", 'c', ('0', '9')];
        assert_eq!(matched("abc7", ""), rule.parse("abc7"));
        assert_eq!(matched("abc0", "d"), rule.parse("abc0d"));
        assert_eq!(None, rule.parse("abcd"));
        assert_eq!(None, rule.parse("ab"));
    }

    #[test]
    fn alternatives_first_match_wins() {
        let rule = alternatives!['a', 'b', 'c'];
        assert_eq!(matched("a", ""), rule.parse("a"));
        assert_eq!(matched("b", ""), rule.parse("b"));
        assert_eq!(matched("c", ""), rule.parse("c"));
        assert_eq!(matched("a", "b"), rule.parse("ab"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("d"));
    }

    #[test]
    fn alternatives_are_ordered_not_longest() {
        let rule = alternatives!["a", "ab"];
        assert_eq!(matched("a", "b"), rule.parse("ab"));
        let rule = alternatives!["ab", "a"];
        assert_eq!(matched("ab", ""), rule.parse("ab"));
    }

    #[test]
    fn deep_alternatives() {
        let rule = alternatives![
            'a',
            alternatives![],
            alternatives!['b', 'c'],
            alternatives!['d', 'e', alternatives!['f', 'g']],
        ];
        for input in ["a", "b", "c", "d", "e", "f", "g"] {
            assert_eq!(matched(input, ""), rule.parse(input));
        }
        assert_eq!(matched("a", "b"), rule.parse("ab"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("h"));
    }

    #[test]
    fn empty_alternatives_never_match() {
        let rule = alternatives![];
        assert_eq!(None, rule.parse("a"));
        assert_eq!(None, rule.parse(""));
        let rule = concatenate![alternatives![], alternatives![]];
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("abc"));
    }

    #[test]
    fn alternatives_retry_from_original_input() {
        let rule = alternatives!["abc", "abd", "def"];
        assert_eq!(matched("abd", ""), rule.parse("abd"));
        assert_eq!(matched("def", ""), rule.parse("def"));
        assert_eq!(matched("abc", "def"), rule.parse("abcdef"));
        assert_eq!(None, rule.parse("bcd"));
    }

    #[test]
    fn concatenate_alternatives() {
        let rule = concatenate![alternatives!['a', 'b', 'c'], alternatives!['d', 'e', 'f']];
        for first in ['a', 'b', 'c'] {
            for second in ['d', 'e', 'f'] {
                let input = format!("{}{}", first, second);
                assert_eq!(matched(&input, ""), rule.parse(&input));
            }
        }
        assert_eq!(matched("ad", "a"), rule.parse("ada"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("da"));
        assert_eq!(None, rule.parse("dd"));
    }

    #[test]
    fn alternative_empty_concatenates() {
        let rule = alternatives![concatenate![], concatenate![]];
        assert_eq!(matched("", ""), rule.parse(""));
        assert_eq!(matched("", "abc"), rule.parse("abc"));
    }

    #[test]
    fn range_alternatives_inclusive() {
        let rule = range_alternatives('a', 'c');
        assert_eq!(matched("a", ""), rule.parse("a"));
        assert_eq!(matched("b", ""), rule.parse("b"));
        assert_eq!(matched("c", ""), rule.parse("c"));
        assert_eq!(matched("a", "b"), rule.parse("ab"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("d"));
        assert_eq!(None, rule.parse("`"));
    }

    #[test]
    fn backwards_range_never_matches() {
        let rule = range_alternatives('c', 'a');
        assert_eq!(None, rule.parse("a"));
        assert_eq!(None, rule.parse("b"));
    }

    #[test]
    fn repetition_unbounded() {
        let rule = repetition('a', 0, None);
        assert_eq!(matched("a", ""), rule.parse("a"));
        assert_eq!(matched("aaaaaa", ""), rule.parse("aaaaaa"));
        assert_eq!(matched("aaaaa", "b"), rule.parse("aaaaab"));
        assert_eq!(matched("", ""), rule.parse(""));
        assert_eq!(matched("", "b"), rule.parse("b"));
    }

    #[test]
    fn repetition_with_min() {
        let rule = repetition('a', 3, None);
        assert_eq!(matched("aaa", ""), rule.parse("aaa"));
        assert_eq!(matched("aaaaaa", ""), rule.parse("aaaaaa"));
        assert_eq!(matched("aaaaa", "b"), rule.parse("aaaaab"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("aa"));
        assert_eq!(None, rule.parse("baaa"));
    }

    #[test]
    fn repetition_with_max() {
        let rule = repetition('a', 0, Some(3));
        assert_eq!(matched("aa", ""), rule.parse("aa"));
        assert_eq!(matched("aaa", ""), rule.parse("aaa"));
        assert_eq!(matched("aaa", "a"), rule.parse("aaaa"));
        assert_eq!(matched("aaa", "b"), rule.parse("aaab"));
        assert_eq!(matched("aa", "b"), rule.parse("aab"));
        assert_eq!(matched("", ""), rule.parse(""));
    }

    #[test]
    fn repetition_with_min_and_max() {
        let rule = repetition('a', 2, Some(4));
        assert_eq!(matched("aaa", ""), rule.parse("aaa"));
        assert_eq!(matched("aa", ""), rule.parse("aa"));
        assert_eq!(matched("aaaa", ""), rule.parse("aaaa"));
        assert_eq!(matched("aaaa", "a"), rule.parse("aaaaa"));
        assert_eq!(matched("aaa", "b"), rule.parse("aaab"));
        assert_eq!(None, rule.parse(""));
        assert_eq!(None, rule.parse("a"));
        assert_eq!(None, rule.parse("ab"));
    }

    #[test]
    fn exact_repetition() {
        let rule = repetition('a', 3, Some(3));
        assert_eq!(matched("aaa", ""), rule.parse("aaa"));
        assert_eq!(matched("aaa", "a"), rule.parse("aaaa"));
        assert_eq!(None, rule.parse("aa"));
    }

    #[test]
    fn repetition_with_zero_max_matches_nothing() {
        let rule = repetition('a', 0, Some(0));
        assert_eq!(matched("", "aaa"), rule.parse("aaa"));
    }

    #[test]
    fn repetition_with_min_above_max_never_matches() {
        let rule = repetition('a', 3, Some(2));
        assert_eq!(None, rule.parse("aaa"));
        assert_eq!(None, rule.parse("aa"));
        assert_eq!(None, rule.parse(""));
    }

    #[test]
    fn repetition_of_empty_match_terminates() {
        let rule = repetition(repetition('a', 0, None), 2, None);
        assert_eq!(matched("aaa", "b"), rule.parse("aaab"));
        assert_eq!(matched("", "b"), rule.parse("b"));
    }

    #[test]
    fn repetition_is_greedy_without_backtracking() {
        let rule = concatenate![repetition('a', 0, None), 'a'];
        assert_eq!(None, rule.parse("aaa"));
    }

    #[test]
    fn repetition_handles_long_input() {
        let input = "a".repeat(1_000_000);
        let rule = repetition('a', 1, None);
        assert_eq!(matched(&input, ""), rule.parse(&input));
    }

    #[test]
    fn optional_matches_at_most_once() {
        let rule = optional('a');
        assert_eq!(matched("a", ""), rule.parse("a"));
        assert_eq!(matched("a", "a"), rule.parse("aa"));
        assert_eq!(matched("a", "b"), rule.parse("ab"));
        assert_eq!(matched("", ""), rule.parse(""));
        assert_eq!(matched("", "b"), rule.parse("b"));
    }

    #[test]
    fn end_requires_whole_input() {
        let rule = end(concatenate!["ab", optional('c')]);
        assert_eq!(Some("ab"), rule.parse("ab"));
        assert_eq!(Some("abc"), rule.parse("abc"));
        assert_eq!(None, rule.parse("abcd"));
        assert_eq!(matched("abc", "d"), rule.rule().parse("abcd"));
        assert_eq!(None, rule.parse("a"));
        assert_eq!(None, rule.parse(""));
    }

    #[test]
    fn rules_are_shareable_between_threads() {
        let rule = end(repetition(('0', '9'), 1, None));
        let handles = (0..4)
            .map(|i| {
                let rule = rule.clone();
                std::thread::spawn(move || {
                    let input = i.to_string().repeat(100);
                    rule.parse(&input).map(str::len)
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(Some(100), handle.join().unwrap());
        }
    }

    proptest! {
        #[test]
        fn terminal_matches_iff_first_code_point_equals(
            value in any::<char>(),
            input in any::<String>(),
        ) {
            let rule = terminal(value);
            match input.chars().next() {
                Some(first) if first == value => {
                    let len = first.len_utf8();
                    prop_assert_eq!(
                        matched(&input[..len], &input[len..]),
                        rule.parse(&input)
                    );
                },
                _ => prop_assert_eq!(None, rule.parse(&input)),
            }
        }

        #[test]
        fn empty_concatenate_matches_anything(input in any::<String>()) {
            prop_assert_eq!(matched("", &input), concatenate![].parse(&input));
        }

        #[test]
        fn empty_alternatives_match_nothing(input in any::<String>()) {
            prop_assert_eq!(None, alternatives![].parse(&input));
        }

        #[test]
        fn unbounded_repetition_takes_maximal_run(input in "[ab]{0,40}") {
            let rule = repetition('a', 0, None);
            let run = input.len() - input.trim_start_matches('a').len();
            prop_assert_eq!(
                matched(&input[..run], &input[run..]),
                rule.parse(&input)
            );
        }

        #[test]
        fn end_matches_iff_nothing_left_over(input in "[0-9a]{0,20}") {
            let rule = repetition(('0', '9'), 0, None);
            let anchored = end(rule.clone());
            let remainder = rule.parse(&input).map(|m| m.remainder);
            prop_assert_eq!(
                remainder == Some(""),
                anchored.parse(&input).is_some()
            );
        }
    }

}
