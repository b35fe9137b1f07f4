use jsyntax::parser::lexer::{LexErrorKind, Token};
use jsyntax::parser::Lexer;

#[test]
fn lexer_keywords() {
    let source = "public class Test extends Object implements Interface";
    let lexer = Lexer::new(source);
    let tokens = lexer.tokenize().expect("Failed to tokenize");

    assert_eq!(tokens.len(), 7);
    assert!(tokens[0].is(&Token::Public));
    assert!(tokens[1].is(&Token::Class));
    assert!(tokens[2].is(&Token::Identifier));
    assert!(tokens[3].is(&Token::Extends));
    assert!(tokens[4].is(&Token::Identifier));
    assert!(tokens[5].is(&Token::Implements));
    assert!(tokens[6].is(&Token::Identifier));
}

#[test]
fn lexer_operators() {
    let source = "+ - * / % = += -= *= /= %= :: -> ... @";
    let lexer = Lexer::new(source);
    let tokens = lexer.tokenize().expect("Failed to tokenize");

    let kinds: Vec<Token> = tokens.iter().map(|t| t.token).collect();
    assert_eq!(
        kinds,
        vec![
            Token::Plus,
            Token::Minus,
            Token::Star,
            Token::Slash,
            Token::Percent,
            Token::Assign,
            Token::AddAssign,
            Token::SubAssign,
            Token::MulAssign,
            Token::DivAssign,
            Token::ModAssign,
            Token::DoubleColon,
            Token::Arrow,
            Token::Ellipsis,
            Token::At,
        ]
    );
}

#[test]
fn lexer_comments_are_skipped() {
    let source = "// This is a comment\n/* This is a block comment */";
    let lexer = Lexer::new(source);
    let tokens = lexer.tokenize().expect("Failed to tokenize");

    assert_eq!(tokens.len(), 0);
}

#[test]
fn commented_out_code_is_inert() {
    let source = "// public enum Day {\n//     SUNDAY(0;\n/* class X { int y = ; } */\nenum Level { LOW }";
    let (tokens, errors) = Lexer::new(source).tokenize_all();
    assert!(errors.is_empty());
    assert_eq!(tokens[0].token, Token::Enum);
    assert_eq!(tokens[0].span.start.line, 4);
}

#[test]
fn byte_order_mark_is_ignored() {
    let tokens = Lexer::new("\u{FEFF}class A {}").tokenize().expect("Failed to tokenize");
    assert_eq!(tokens.len(), 4);
    assert!(tokens[0].is(&Token::Class));
}

#[test]
fn record_is_contextual() {
    let tokens = Lexer::new("record R() {} int record = 1;").tokenize().expect("Failed to tokenize");
    assert_eq!(tokens[0].token, Token::Identifier);
    assert_eq!(tokens[0].lexeme(), "record");
    assert_eq!(tokens[7].token, Token::Identifier);
    assert_eq!(tokens[7].lexeme(), "record");
}

#[test]
fn numeric_literal_shapes() {
    let source = "0 42 0x1F 0b1010 017 1_000 10L 1.5 .5 1e10 2.5f 3d 0x7fffffffffffffffL";
    let (tokens, errors) = Lexer::new(source).tokenize_all();
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(tokens.len(), 13);
    assert!(tokens.iter().all(|t| t.token == Token::NumberLiteral));
}

#[test]
fn malformed_numbers_are_flagged_literals() {
    for bad in ["0x", "1e", "09", "1_", "2147483649", "99999999999999999999L"] {
        let (tokens, errors) = Lexer::new(bad).tokenize_all();
        assert_eq!(errors.len(), 1, "{}", bad);
        assert!(matches!(errors[0].kind, LexErrorKind::InvalidNumber(_)), "{}", bad);
        assert_eq!(tokens.len(), 1, "{}", bad);
        assert!(tokens[0].flagged);
    }
}

#[test]
fn valid_escapes_are_accepted() {
    let source = r#""\b\t\n\f\r\s\"\'\\" '\0' '\377' "A\uuu0042" 'é'"#;
    let (tokens, errors) = Lexer::new(source).tokenize_all();
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(tokens.len(), 5);
}

#[test]
fn unterminated_char_reports_opening_quote() {
    let (tokens, errors) = Lexer::new("c = 'x\n;").tokenize_all();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexErrorKind::UnterminatedChar);
    assert_eq!((errors[0].span.start.line, errors[0].span.start.column), (1, 5));
    assert_eq!(tokens.last().map(|t| t.token), Some(Token::Semicolon));
}

#[test]
fn multi_character_char_literal_is_invalid() {
    let (_, errors) = Lexer::new("'ab'").tokenize_all();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, LexErrorKind::InvalidChar(_)));
}

#[test]
fn tokenize_stops_at_first_error() {
    let err = Lexer::new("a # b").tokenize().expect_err("unexpected character");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter);
    assert_eq!(err.span.start.column, 3);
}

#[test]
fn columns_count_characters_not_bytes() {
    let tokens = Lexer::new("\"héllo\" x").tokenize().expect("Failed to tokenize");
    assert_eq!(tokens[1].span.start.column, 9);
    assert_eq!(tokens[1].span.start.offset, 9);
}
