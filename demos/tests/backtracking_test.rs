use rstest::rstest;
use scanpile::{Coordinate, ReadSource, Span};
use scanpile_demos::backtracking::{scanner, Scanner, TToken};

fn c(offset: usize, line: usize, column: usize) -> Coordinate {
    Coordinate::new(offset, line, column)
}

fn kinds_and_lexemes(input: &str) -> Vec<(TToken, String)> {
    scanner(input)
        .tokens()
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

#[test]
fn test_empty_input() {
    let scanner = scanner("");
    let token = scanner.current();
    assert_eq!(token.kind, TToken::EOS);
    assert_eq!(token.span, Span::Coordinate(c(0, 1, 1)));
    assert_eq!(token.lexeme, "");
}

#[test]
fn test_whitespace_only() {
    let scanner = scanner("     ");
    assert_eq!(scanner.current().kind, TToken::EOS);
    assert_eq!(scanner.current().span, Span::Coordinate(c(5, 1, 6)));
}

#[test]
fn test_float() {
    let mut scanner = scanner("123.456");
    let token = scanner.current().clone();
    assert_eq!(token.kind, TToken::LiteralFloat);
    assert_eq!(token.lexeme, "123.456");
    assert_eq!(token.span, Span::range(c(0, 1, 1), c(6, 1, 7)));
    scanner.next();
    assert_eq!(scanner.current().kind, TToken::EOS);
    assert_eq!(scanner.current().span, Span::Coordinate(c(7, 1, 8)));
}

#[test]
fn test_integer_followed_by_range() {
    let mut scanner = scanner("123..4");
    let spans: Vec<(TToken, Span)> = scanner.tokens().map(|t| (t.kind, t.span)).collect();
    assert_eq!(
        spans,
        vec![
            (TToken::LiteralInt, Span::range(c(0, 1, 1), c(2, 1, 3))),
            (TToken::DotDot, Span::range(c(3, 1, 4), c(4, 1, 5))),
            (TToken::LiteralInt, Span::Coordinate(c(5, 1, 6))),
            (TToken::EOS, Span::Coordinate(c(6, 1, 7))),
        ]
    );
}

#[rstest]
#[case::exponent("1.5e+7", &[(TToken::LiteralFloat, "1.5e+7")])]
#[case::exponent_without_sign("2.0E12", &[(TToken::LiteralFloat, "2.0E12")])]
#[case::overrun_by_one("1.5e", &[(TToken::LiteralFloat, "1.5"), (TToken::ERROR, "e")])]
#[case::overrun_by_two("1.5e+x", &[
    (TToken::LiteralFloat, "1.5"),
    (TToken::ERROR, "e"),
    (TToken::Plus, "+"),
    (TToken::ERROR, "x"),
])]
#[case::trailing_dot("7.", &[(TToken::LiteralInt, "7"), (TToken::ERROR, ".")])]
#[case::plus_chain("1+2.5+", &[
    (TToken::LiteralInt, "1"),
    (TToken::Plus, "+"),
    (TToken::LiteralFloat, "2.5"),
    (TToken::Plus, "+"),
])]
#[case::dots("...", &[(TToken::DotDot, ".."), (TToken::ERROR, ".")])]
fn test_maximal_munch(#[case] input: &str, #[case] expected: &[(TToken, &str)]) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut expected: Vec<(TToken, String)> = expected
        .iter()
        .map(|(k, l)| (*k, l.to_string()))
        .collect();
    expected.push((TToken::EOS, String::new()));
    assert_eq!(kinds_and_lexemes(input), expected);
}

#[test]
fn test_lexemes_reassemble_the_input() {
    let input = "1.5e+x 12..3 4.25E-3 7. ++..";
    let joined: String = kinds_and_lexemes(input)
        .into_iter()
        .map(|(_, lexeme)| lexeme)
        .collect();
    assert_eq!(joined, input.replace(' ', ""));
}

#[test]
fn test_end_of_stream_is_sticky() {
    let mut scanner = scanner("1");
    scanner.next();
    let eos = scanner.current().clone();
    assert_eq!(eos.kind, TToken::EOS);
    for _ in 0..3 {
        scanner.next();
        assert_eq!(scanner.current(), &eos);
    }
    assert_eq!(scanner.tokens().count(), 1);
}

#[test]
fn test_read_source() {
    let bytes: &[u8] = b"3.25 .. 4";
    let mut scanner = Scanner::new(ReadSource::new(bytes));
    let kinds: Vec<TToken> = scanner.tokens().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TToken::LiteralFloat,
            TToken::DotDot,
            TToken::LiteralInt,
            TToken::EOS
        ]
    );
    assert!(scanner.source().error().is_none());
}

#[test]
fn test_read_source_with_invalid_utf8() {
    let bytes: &[u8] = &[b'1', b' ', 0xff, b'2'];
    let mut scanner = Scanner::new(ReadSource::new(bytes));
    let kinds: Vec<TToken> = scanner.tokens().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TToken::LiteralInt, TToken::EOS]);
    assert!(scanner.source().error().is_some());
}

struct CountingSource<'a> {
    chars: std::str::Chars<'a>,
    polls: usize,
}

impl Iterator for CountingSource<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.polls += 1;
        self.chars.next()
    }
}

#[test]
fn test_backtracking_reads_each_character_once() {
    let _ = env_logger::builder().is_test(true).try_init();
    let input = "1.5e+x 12..3 4.25E-3 7. ++.. 1.5e-";
    let mut scanner = Scanner::new(CountingSource {
        chars: input.chars(),
        polls: 0,
    });
    let errors = scanner.tokens().filter(|t| t.kind == TToken::ERROR).count();
    assert!(errors > 0);
    // One poll per character plus the one that reports the end of input.
    assert_eq!(scanner.source().polls, input.chars().count() + 1);
}
