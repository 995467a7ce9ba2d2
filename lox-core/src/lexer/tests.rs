use super::prelude::{scan, Lexer, LexicalError, LexicalErrorType, Literal, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    let (tokens, errors) = scan(input);
    assert!(errors.is_empty(), "unexpected lexical errors: {errors:?}");

    tokens.into_iter().map(|token| token.kind).collect()
}

#[test]
fn test_punctuation() {
    let input = "(){},.-+;*/?:";

    assert_eq!(kinds(input), vec![
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::Minus,
        TokenKind::Plus,
        TokenKind::Semicolon,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Question,
        TokenKind::Colon,
        TokenKind::Eof,
    ]);
}

#[test]
fn test_operators() {
    let input = "! != = == < <= > >= !== =!";

    assert_eq!(kinds(input), vec![
        TokenKind::Bang,
        TokenKind::BangEqual,
        TokenKind::Equal,
        TokenKind::EqualEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
        TokenKind::BangEqual,
        TokenKind::Equal,
        TokenKind::Equal,
        TokenKind::Bang,
        TokenKind::Eof,
    ]);
}

#[test]
fn test_numbers() -> std::result::Result<(), LexicalError> {
    let input = r#"
        10
        1.5
        007
        123.
        .5
    "#;

    let mut lexer = Lexer::new(input.chars());

    let expected = vec![
        (TokenKind::Number, "10", Some(Literal::Number(10.0))),
        (TokenKind::Number, "1.5", Some(Literal::Number(1.5))),
        (TokenKind::Number, "007", Some(Literal::Number(7.0))),
        (TokenKind::Number, "123", Some(Literal::Number(123.0))),
        (TokenKind::Dot, ".", None),
        (TokenKind::Dot, ".", None),
        (TokenKind::Number, "5", Some(Literal::Number(5.0))),
        (TokenKind::Eof, "", None),
    ];

    for (idx, (kind, lexeme, literal)) in expected.into_iter().enumerate() {
        let token = lexer.next_token()?;

        assert_eq!(kind, token.kind, "kind mismatch at {idx}");
        assert_eq!(lexeme, token.lexeme, "lexeme mismatch at {idx}");
        assert_eq!(literal, token.literal, "literal mismatch at {idx}");
    }

    Ok(())
}

#[test]
fn test_keywords_and_identifiers() {
    let input = "and class else false for fun if nil or print return super this true var while \
                 And _private var1 printer";

    assert_eq!(kinds(input), vec![
        TokenKind::And,
        TokenKind::Class,
        TokenKind::Else,
        TokenKind::False,
        TokenKind::For,
        TokenKind::Fun,
        TokenKind::If,
        TokenKind::Nil,
        TokenKind::Or,
        TokenKind::Print,
        TokenKind::Return,
        TokenKind::Super,
        TokenKind::This,
        TokenKind::True,
        TokenKind::Var,
        TokenKind::While,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Eof,
    ]);
}

#[test]
fn test_strings() {
    let (tokens, errors) = scan("\"hello\" \"multi\nline\" \"\"");

    assert!(errors.is_empty());
    assert_eq!(tokens[0].literal, Some(Literal::String("hello".into())));
    assert_eq!(tokens[0].lexeme, "\"hello\"");
    assert_eq!(tokens[1].literal, Some(Literal::String("multi\nline".into())));
    assert_eq!(tokens[1].line, 1);
    assert_eq!(tokens[2].literal, Some(Literal::String("".into())));
    assert_eq!(tokens[2].line, 2);
    assert_eq!(tokens[3].kind, TokenKind::Eof);
}

#[test]
fn test_comments_and_lines() {
    let input = r#"var a = 1; // trailing comment
// whole line
print a;
"#;

    let (tokens, errors) = scan(input);

    assert!(errors.is_empty());

    let lines = tokens.iter()
        .map(|token| (token.kind, token.line))
        .collect::<Vec<_>>();

    assert_eq!(lines, vec![
        (TokenKind::Var, 1),
        (TokenKind::Identifier, 1),
        (TokenKind::Equal, 1),
        (TokenKind::Number, 1),
        (TokenKind::Semicolon, 1),
        (TokenKind::Print, 3),
        (TokenKind::Identifier, 3),
        (TokenKind::Semicolon, 3),
        (TokenKind::Eof, 4),
    ]);
}

#[test]
fn test_lines_are_monotonic_and_single_eof() {
    let input = "var x = \"a\nb\";\n\n{ print x; }\n// done";

    let (tokens, _) = scan(input);

    assert!(tokens.windows(2).all(|pair| pair[0].line <= pair[1].line));
    assert_eq!(tokens.iter().filter(|token| token.is_eof()).count(), 1);
    assert!(tokens.last().is_some_and(|token| token.is_eof()));
}

#[test]
fn test_unexpected_characters_do_not_abort() {
    let input = "var a = 1 @ 2;\n# $";

    let (tokens, errors) = scan(input);

    let fails = errors.iter()
        .map(|err| (err.error, err.line))
        .collect::<Vec<_>>();

    assert_eq!(fails, vec![
        (LexicalErrorType::UnexpectedCharacter { ch: '@' }, 1),
        (LexicalErrorType::UnexpectedCharacter { ch: '#' }, 2),
        (LexicalErrorType::UnexpectedCharacter { ch: '$' }, 2),
    ]);

    assert_eq!(tokens.len(), 7);
    assert_eq!(errors[0].to_string(), "[line 1] Error: Unexpected character");
}

#[test]
fn test_unterminated_string() {
    let (tokens, errors) = scan("print \"never\nclosed");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error, LexicalErrorType::UnterminatedString);
    assert_eq!(errors[0].line, 2);
    assert_eq!(errors[0].to_string(), "[line 2] Error: Unterminated string");
    assert_eq!(tokens.iter().map(|token| token.kind).collect::<Vec<_>>(), vec![TokenKind::Print, TokenKind::Eof]);
}

#[test]
fn test_spans() {
    let (tokens, _) = scan("ab >= \"é\"");

    assert_eq!(tokens[0].location.start, 0);
    assert_eq!(tokens[0].location.end, 2);
    assert_eq!(tokens[1].location.start, 3);
    assert_eq!(tokens[1].location.end, 5);
    assert_eq!(tokens[2].location.start, 6);
    assert_eq!(tokens[2].location.end, 10);
    assert_eq!(tokens[3].location.start, 10);
}

#[test]
fn test_iterator_ends_after_eof() {
    let mut lexer = Lexer::new("1".chars());

    assert!(matches!(lexer.next(), Some(Ok(token)) if token.kind == TokenKind::Number));
    assert!(matches!(lexer.next(), Some(Ok(token)) if token.is_eof()));
    assert!(lexer.next().is_none());
}
