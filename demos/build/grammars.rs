//! The automata of the demo scanners.
//!
//! They are written down the way a grammar compiler would hand them over: deterministic and
//! with the final values numbered as `scanpile_generate::Definition` describes.

use scanpile_generate::{Automaton, CharSet, Comment, Definition};

pub fn all() -> Vec<(&'static str, Definition)> {
    vec![
        ("backtracking", backtracking()),
        ("comments", comments()),
        ("keywords", keywords()),
    ]
}

fn digit() -> CharSet {
    CharSet::range('0', '9')
}

fn letter() -> CharSet {
    CharSet::range('a', 'z')
        .union(&CharSet::range('A', 'Z'))
        .union(&CharSet::from_chars(['_']))
}

fn alnum() -> CharSet {
    letter().union(&digit())
}

fn chars(s: &str) -> CharSet {
    CharSet::from_chars(s.chars())
}

fn tokens(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Numbers, ranges and plus signs.
///
/// A float needs up to two characters of lookahead beyond the last complete match, `1.5e+` is
/// not a float but `1.5` is.
///
/// Final values: 0 LiteralInt, 1 LiteralFloat, 2 DotDot, 3 Plus, 4 EOS, 5 ERROR.
fn backtracking() -> Definition {
    Definition {
        tokens: tokens(&["LiteralInt", "LiteralFloat", "DotDot", "Plus"]),
        whitespace: CharSet::from_ranges([(0, 32)]),
        comments: vec![],
        automaton: Automaton::new()
            .transition(0, CharSet::end_of_stream(), 6)
            .transition(0, digit(), 1)
            .transition(0, chars("."), 4)
            .transition(0, chars("+"), 10)
            .transition(1, digit(), 1)
            .transition(1, chars("."), 2)
            .transition(2, digit(), 3)
            .transition(3, digit(), 3)
            .transition(3, chars("eE"), 7)
            .transition(7, chars("+-"), 8)
            .transition(7, digit(), 9)
            .transition(8, digit(), 9)
            .transition(9, digit(), 9)
            .transition(4, chars("."), 5)
            .accept(1, 0)
            .accept(3, 1)
            .accept(9, 1)
            .accept(5, 2)
            .accept(10, 3)
            .accept(6, 4),
    }
}

/// Identifiers and integers with three comment styles: `// ...`, `/* ... */` and the nestable
/// `(* ... *)`.
///
/// Final values: 0 Identifier, 1 LiteralInt, 2 EOS, 3 ERROR, 4 line comment, 5 block comment,
/// 6 nested block comment.
fn comments() -> Definition {
    // Outcomes: 0 continue, 1 closed.
    let block = Automaton::new()
        .transition(0, chars("*"), 1)
        .transition(0, CharSet::any_except(['*']), 2)
        .transition(1, chars("/"), 3)
        .transition(1, chars("*"), 1)
        .transition(1, CharSet::any_except(['/', '*']), 2)
        .accept(2, 0)
        .accept(3, 1);
    // Outcomes: 0 continue, 1 opened, 2 closed.
    let nested = Automaton::new()
        .transition(0, chars("("), 1)
        .transition(0, chars("*"), 2)
        .transition(0, CharSet::any_except(['(', '*']), 3)
        .transition(1, chars("*"), 4)
        .transition(1, chars("("), 1)
        .transition(1, CharSet::any_except(['*', '(']), 3)
        .transition(2, chars(")"), 5)
        .transition(2, chars("*"), 2)
        .transition(2, chars("("), 1)
        .transition(2, CharSet::any_except([')', '*', '(']), 3)
        .accept(3, 0)
        .accept(4, 1)
        .accept(5, 2);
    Definition {
        tokens: tokens(&["Identifier", "LiteralInt"]),
        whitespace: chars(" \t\r\n"),
        comments: vec![
            Comment::Line {
                open: "//".to_string(),
            },
            Comment::BlockNonNested {
                open: Some("/*".to_string()),
                close: "*/".to_string(),
                automaton: block,
            },
            Comment::BlockNested {
                open: "(*".to_string(),
                close: "*)".to_string(),
                automaton: nested,
            },
        ],
        automaton: Automaton::new()
            .transition(0, CharSet::end_of_stream(), 1)
            .transition(0, letter(), 2)
            .transition(0, digit(), 3)
            .transition(0, chars("/"), 4)
            .transition(0, chars("("), 6)
            .transition(2, alnum(), 2)
            .transition(3, digit(), 3)
            .transition(4, chars("/"), 5)
            .transition(4, chars("*"), 7)
            .transition(5, CharSet::any_except(['\n']), 5)
            .transition(6, chars("*"), 8)
            .accept(1, 2)
            .accept(2, 0)
            .accept(3, 1)
            .accept(5, 4)
            .accept(7, 5)
            .accept(8, 6),
    }
}

/// The keywords `to` and `tokens` next to identifiers, semicolons and strings.
///
/// Specific transitions are declared in front of the broader identifier transitions, the first
/// matching transition wins.
///
/// Final values: 0 To, 1 Tokens, 2 Identifier, 3 Semicolon, 4 LiteralString, 5 EOS, 6 ERROR.
fn keywords() -> Definition {
    let mut automaton = Automaton::new()
        .transition(0, CharSet::end_of_stream(), 20)
        .transition(0, chars("t"), 1)
        .transition(0, letter(), 10)
        .transition(0, chars(";"), 11)
        .transition(0, chars("\""), 12);
    // t -> o -> k -> e -> n -> s
    for (node, c) in [(1, 'o'), (2, 'k'), (3, 'e'), (4, 'n'), (5, 's')] {
        automaton = automaton
            .transition(node, CharSet::from_chars([c]), node + 1)
            .transition(node, alnum(), 10);
    }
    automaton = automaton
        .transition(6, alnum(), 10)
        .transition(10, alnum(), 10)
        .transition(12, chars("\""), 13)
        .transition(12, CharSet::any_except(['"', '\n']), 12)
        .accept(1, 2)
        .accept(2, 0)
        .accept(3, 2)
        .accept(4, 2)
        .accept(5, 2)
        .accept(6, 1)
        .accept(10, 2)
        .accept(11, 3)
        .accept(13, 4)
        .accept(20, 5);
    Definition {
        tokens: tokens(&["To", "Tokens", "Identifier", "Semicolon", "LiteralString"]),
        whitespace: chars(" \t\r\n"),
        comments: vec![],
        automaton,
    }
}
