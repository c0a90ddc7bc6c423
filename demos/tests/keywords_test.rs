use rstest::rstest;
use scanpile_demos::keywords::{scanner, TToken};

fn kinds_and_lexemes(input: &str) -> Vec<(TToken, String)> {
    scanner(input)
        .tokens()
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

#[rstest]
#[case::keyword("to", TToken::To)]
#[case::longer_keyword("tokens", TToken::Tokens)]
#[case::keyword_prefix("t", TToken::Identifier)]
#[case::between_keywords("token", TToken::Identifier)]
#[case::keyword_extended("tokensX", TToken::Identifier)]
#[case::keyword_with_digit("to2", TToken::Identifier)]
#[case::identifier("other", TToken::Identifier)]
#[case::string("\"to;\"", TToken::LiteralString)]
fn test_single_token(#[case] input: &str, #[case] kind: TToken) {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(
        kinds_and_lexemes(input),
        vec![(kind, input.to_string()), (TToken::EOS, String::new())]
    );
}

#[test]
fn test_statement() {
    let tokens = kinds_and_lexemes("to x;tokens;");
    let kinds: Vec<TToken> = tokens.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            TToken::To,
            TToken::Identifier,
            TToken::Semicolon,
            TToken::Tokens,
            TToken::Semicolon,
            TToken::EOS
        ]
    );
}

#[rstest]
#[case::end_of_input("\"open", "\"open")]
#[case::end_of_line("\"open\nx", "\"open")]
fn test_unterminated_string(#[case] input: &str, #[case] lexeme: &str) {
    let tokens = kinds_and_lexemes(input);
    assert_eq!(tokens[0], (TToken::ERROR, lexeme.to_string()));
}

#[test]
fn test_display() {
    assert_eq!(TToken::Tokens.to_string(), "Tokens");
    assert_eq!(TToken::EOS.to_string(), "EOS");
    assert_eq!(TToken::ERROR.to_string(), "ERROR");
    let mut scanner = scanner("to");
    assert_eq!(scanner.current().to_string(), "To 0:1:1-1:1:2 [to]");
    scanner.next();
    assert_eq!(scanner.current().to_string(), "EOS 2:1:3 []");
}
