use std::collections::VecDeque;
use std::fmt;

use logos::Logos;

use super::literal;
use super::span::{Location, Span};

/// Lexical error categories.
///
/// `UnexpectedCharacter` is the default logos reports for input no rule
/// matches; the others come from the literal and comment callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedTextBlock,
    UnterminatedChar,
    UnterminatedComment,
    InvalidEscape(String),
    InvalidTextBlock(String),
    InvalidChar(String),
    InvalidNumber(String),
}

impl LexErrorKind {
    /// Token emitted in place of the malformed input so the parser can keep
    /// going without a cascade of follow-up errors
    fn recovered_token(&self) -> Option<Token> {
        match self {
            LexErrorKind::UnterminatedString
            | LexErrorKind::UnterminatedTextBlock
            | LexErrorKind::InvalidTextBlock(_)
            | LexErrorKind::InvalidEscape(_) => Some(Token::StringLiteral),
            LexErrorKind::UnterminatedChar | LexErrorKind::InvalidChar(_) => Some(Token::CharLiteral),
            LexErrorKind::InvalidNumber(_) => Some(Token::NumberLiteral),
            LexErrorKind::UnexpectedCharacter | LexErrorKind::UnterminatedComment => None,
        }
    }

    /// Block comments and text blocks run to end of input when unterminated
    fn swallows_rest(&self) -> bool {
        matches!(self, LexErrorKind::UnterminatedComment | LexErrorKind::UnterminatedTextBlock)
    }

    /// Unterminated constructs are reported at their opening delimiter
    fn reports_opening(&self) -> Option<usize> {
        match self {
            LexErrorKind::UnterminatedString | LexErrorKind::UnterminatedChar => Some(1),
            LexErrorKind::UnterminatedTextBlock | LexErrorKind::InvalidTextBlock(_) => Some(3),
            LexErrorKind::UnterminatedComment => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter => write!(f, "unexpected character"),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnterminatedTextBlock => write!(f, "unterminated text block"),
            LexErrorKind::UnterminatedChar => write!(f, "unterminated character literal"),
            LexErrorKind::UnterminatedComment => write!(f, "unterminated block comment"),
            LexErrorKind::InvalidEscape(msg)
            | LexErrorKind::InvalidTextBlock(msg)
            | LexErrorKind::InvalidChar(msg)
            | LexErrorKind::InvalidNumber(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

fn lex_block_comment(lex: &mut logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(idx) => {
            lex.bump(idx + 2);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

/// Scan a quoted literal up to its closing quote; stops before a line break
fn scan_quoted(lex: &mut logos::Lexer<Token>, quote: char) -> Option<()> {
    let rest = lex.remainder();
    let mut escaped = false;
    for (idx, ch) in rest.char_indices() {
        if ch == '\n' || ch == '\r' {
            lex.bump(idx);
            return None;
        }
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            lex.bump(idx + ch.len_utf8());
            return Some(());
        }
    }
    lex.bump(rest.len());
    None
}

fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    scan_quoted(lex, '"').ok_or(LexErrorKind::UnterminatedString)?;
    literal::unescape(literal::literal_body(lex.slice(), '"'))
        .map(|_| ())
        .map_err(|e| LexErrorKind::InvalidEscape(e.to_string()))
}

/// `"""` up to the first unescaped closing `"""`, which may span lines
fn lex_text_block(lex: &mut logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut escaped = false;
    let mut close = None;
    for (idx, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' && rest[idx..].starts_with("\"\"\"") {
            close = Some(idx);
            break;
        }
    }
    let Some(close) = close else {
        lex.bump(rest.len());
        return Err(LexErrorKind::UnterminatedTextBlock);
    };
    lex.bump(close + 3);
    literal::decode_text_block(lex.slice())
        .map(|_| ())
        .map_err(|e| match e {
            literal::LiteralError::InvalidEscape { .. } => LexErrorKind::InvalidEscape(e.to_string()),
            other => LexErrorKind::InvalidTextBlock(other.to_string()),
        })
}

fn lex_char(lex: &mut logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    scan_quoted(lex, '\'').ok_or(LexErrorKind::UnterminatedChar)?;
    literal::decode_char(literal::literal_body(lex.slice(), '\''))
        .map(|_| ())
        .map_err(|e| match e {
            literal::LiteralError::InvalidEscape { .. } => LexErrorKind::InvalidEscape(e.to_string()),
            other => LexErrorKind::InvalidChar(other.to_string()),
        })
}

/// Whether a `.` at `idx` continues the numeric literal scanned so far.
///
/// Decimal literals take a trailing `.` unless an identifier other than an
/// exponent or type suffix follows (`1.`, `2.f`, `3.e2`), so `1.x` stays a
/// member access. Hexadecimal literals take it before more digits or the
/// binary exponent (`0x1.8p1`, `0x1.p3`).
fn dot_continues_number(bytes: &[u8], idx: usize, hex: bool) -> bool {
    let next = bytes.get(idx + 1).copied();
    if hex {
        return next.is_some_and(|b| b.is_ascii_hexdigit() || matches!(b, b'p' | b'P'));
    }
    let is_ident = |b: u8| b.is_ascii_alphanumeric() || b == b'_' || b == b'$';
    match next {
        None => true,
        Some(b'0'..=b'9' | b'e' | b'E') => true,
        Some(b'f' | b'F' | b'd' | b'D') => !bytes.get(idx + 2).copied().is_some_and(is_ident),
        Some(b'.') => false,
        Some(b) => !is_ident(b),
    }
}

/// Numbers start at a digit (or `.digit`) and swallow every identifier
/// character that follows, so `12abc` is one malformed literal rather than
/// two tokens.
fn lex_number(lex: &mut logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    let bytes = lex.remainder().as_bytes();
    let hex = lex.slice() == "0" && matches!(bytes.first(), Some(b'x' | b'X'));
    let mut prev = lex.slice().bytes().last().unwrap_or(b'0');
    let mut seen_dot = lex.slice().starts_with('.');
    let mut seen_exponent = false;
    let mut len = 0;
    while len < bytes.len() {
        let b = bytes[len];
        let take = match b {
            b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => true,
            b'.' => !seen_dot && !seen_exponent && dot_continues_number(bytes, len, hex),
            b'+' | b'-' => {
                if hex {
                    matches!(prev, b'p' | b'P')
                } else {
                    matches!(prev, b'e' | b'E')
                }
            }
            _ => false,
        };
        if !take {
            break;
        }
        seen_dot |= b == b'.';
        // hex digits include `e`, so only `p` marks a hex exponent
        seen_exponent |= if hex { matches!(b, b'p' | b'P') } else { matches!(b, b'e' | b'E') };
        prev = b;
        len += 1;
    }
    lex.bump(len);
    literal::parse_number(lex.slice())
        .map(|_| ())
        .map_err(|e| LexErrorKind::InvalidNumber(e.to_string()))
}

/// Token types for the Java-like source language
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f\u{FEFF}]+")]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("static")]
    Static,
    #[token("public")]
    Public,
    #[token("protected")]
    Protected,
    #[token("private")]
    Private,
    #[token("abstract")]
    Abstract,
    #[token("final")]
    Final,
    #[token("native")]
    Native,
    #[token("synchronized")]
    Synchronized,
    #[token("transient")]
    Transient,
    #[token("volatile")]
    Volatile,
    #[token("strictfp")]
    Strictfp,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("implements")]
    Implements,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("super")]
    Super,
    #[token("instanceof")]
    InstanceOf,
    #[token("void")]
    Void,
    #[token("boolean")]
    Boolean,
    #[token("byte")]
    Byte,
    #[token("short")]
    Short,
    #[token("int")]
    Int,
    #[token("long")]
    Long,
    #[token("char")]
    Char,
    #[token("float")]
    Float,
    #[token("double")]
    Double,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("assert")]
    Assert,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Operators
    #[token("=")]
    Assign,
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    DivAssign,
    #[token("%=")]
    ModAssign,
    #[token("&=")]
    AndAssign,
    #[token("|=")]
    OrAssign,
    #[token("^=")]
    XorAssign,
    #[token("<<=")]
    LShiftAssign,
    #[token(">>=")]
    RShiftAssign,
    #[token(">>>=")]
    URShiftAssign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    LShift,
    #[token(">>")]
    RShift,
    #[token(">>>")]
    URShift,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    PipePipe,
    #[token("==")]
    Eq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token("->")]
    Arrow,

    // Separators
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("...")]
    Ellipsis,

    // Literals
    #[token("\"", lex_string)]
    #[token("\"\"\"", lex_text_block)]
    StringLiteral,
    #[token("'", lex_char)]
    CharLiteral,
    #[regex(r"[0-9]", lex_number)]
    #[regex(r"\.[0-9]", lex_number)]
    NumberLiteral,

    // Identifiers (`record` is contextual and lexes as one)
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    // Comments never leave the lexer
    #[regex(r"//[^\n\r]*")]
    LineComment,
    #[token("/*", lex_block_comment)]
    BlockComment,
}

impl Token {
    /// Check if this token is a primitive type (`void` excluded)
    pub fn is_primitive_type(&self) -> bool {
        matches!(self,
            Token::Boolean | Token::Byte | Token::Short |
            Token::Int | Token::Long | Token::Char |
            Token::Float | Token::Double
        )
    }

    /// Check if this token is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self,
            Token::StringLiteral | Token::CharLiteral | Token::NumberLiteral |
            Token::True | Token::False | Token::Null
        )
    }

    /// Source spelling used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Package => "'package'",
            Token::Import => "'import'",
            Token::Static => "'static'",
            Token::Public => "'public'",
            Token::Protected => "'protected'",
            Token::Private => "'private'",
            Token::Abstract => "'abstract'",
            Token::Final => "'final'",
            Token::Native => "'native'",
            Token::Synchronized => "'synchronized'",
            Token::Transient => "'transient'",
            Token::Volatile => "'volatile'",
            Token::Strictfp => "'strictfp'",
            Token::Class => "'class'",
            Token::Interface => "'interface'",
            Token::Enum => "'enum'",
            Token::Extends => "'extends'",
            Token::Implements => "'implements'",
            Token::New => "'new'",
            Token::This => "'this'",
            Token::Super => "'super'",
            Token::InstanceOf => "'instanceof'",
            Token::Void => "'void'",
            Token::Boolean => "'boolean'",
            Token::Byte => "'byte'",
            Token::Short => "'short'",
            Token::Int => "'int'",
            Token::Long => "'long'",
            Token::Char => "'char'",
            Token::Float => "'float'",
            Token::Double => "'double'",
            Token::If => "'if'",
            Token::Else => "'else'",
            Token::For => "'for'",
            Token::While => "'while'",
            Token::Do => "'do'",
            Token::Switch => "'switch'",
            Token::Case => "'case'",
            Token::Default => "'default'",
            Token::Assert => "'assert'",
            Token::Break => "'break'",
            Token::Continue => "'continue'",
            Token::Return => "'return'",
            Token::Throw => "'throw'",
            Token::Throws => "'throws'",
            Token::Try => "'try'",
            Token::Catch => "'catch'",
            Token::Finally => "'finally'",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Null => "'null'",
            Token::Assign => "'='",
            Token::AddAssign => "'+='",
            Token::SubAssign => "'-='",
            Token::MulAssign => "'*='",
            Token::DivAssign => "'/='",
            Token::ModAssign => "'%='",
            Token::AndAssign => "'&='",
            Token::OrAssign => "'|='",
            Token::XorAssign => "'^='",
            Token::LShiftAssign => "'<<='",
            Token::RShiftAssign => "'>>='",
            Token::URShiftAssign => "'>>>='",
            Token::Plus => "'+'",
            Token::Minus => "'-'",
            Token::Star => "'*'",
            Token::Slash => "'/'",
            Token::Percent => "'%'",
            Token::Inc => "'++'",
            Token::Dec => "'--'",
            Token::Bang => "'!'",
            Token::Tilde => "'~'",
            Token::Amp => "'&'",
            Token::Pipe => "'|'",
            Token::Caret => "'^'",
            Token::LShift => "'<<'",
            Token::RShift => "'>>'",
            Token::URShift => "'>>>'",
            Token::AndAnd => "'&&'",
            Token::PipePipe => "'||'",
            Token::Eq => "'=='",
            Token::Ne => "'!='",
            Token::Lt => "'<'",
            Token::Le => "'<='",
            Token::Gt => "'>'",
            Token::Ge => "'>='",
            Token::Question => "'?'",
            Token::Colon => "':'",
            Token::DoubleColon => "'::'",
            Token::Arrow => "'->'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::Semicolon => "';'",
            Token::Comma => "','",
            Token::Dot => "'.'",
            Token::At => "'@'",
            Token::Ellipsis => "'...'",
            Token::StringLiteral => "string literal",
            Token::CharLiteral => "character literal",
            Token::NumberLiteral => "numeric literal",
            Token::Identifier => "identifier",
            Token::LineComment | Token::BlockComment => "comment",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Lexical token with location information
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalToken {
    pub token: Token,
    pub lexeme: String,
    pub span: Span,
    /// Set when the lexer already reported this token as malformed
    pub flagged: bool,
}

impl LexicalToken {
    pub fn new(token: Token, lexeme: String, span: Span) -> Self {
        Self { token, lexeme, span, flagged: false }
    }

    /// Get the lexeme (actual text)
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Check if this token matches the given token type
    pub fn is(&self, token_type: &Token) -> bool {
        self.token == *token_type
    }
}

/// A lexical error with the span it was reported at
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexical error at {}: {}", self.span.start, self.kind)
    }
}

impl std::error::Error for LexError {}

/// Lazy lexer with unbounded lookahead.
///
/// Whitespace and comments are consumed here and never reach the parser.
/// Lexical errors are collected on the side and drained by the parser.
pub struct Lexer<'a> {
    source: &'a str,
    lexer: logos::Lexer<'a, Token>,
    cursor: Location,
    lookahead: VecDeque<LexicalToken>,
    errors: Vec<LexError>,
    truncated: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Token::lexer(source),
            cursor: Location::start(),
            lookahead: VecDeque::new(),
            errors: Vec::new(),
            truncated: false,
        }
    }

    /// Location of a byte offset at or after the cursor
    fn location_at(&mut self, offset: usize) -> Location {
        if offset > self.cursor.offset {
            let skipped = &self.source[self.cursor.offset..offset];
            self.cursor.advance_str(skipped);
        }
        self.cursor
    }

    /// Location just past the end of the source
    pub fn end_location(&self) -> Location {
        let mut end = self.cursor;
        end.advance_str(&self.source[self.cursor.offset..]);
        end
    }

    fn pull(&mut self) -> Option<LexicalToken> {
        loop {
            let result = self.lexer.next()?;
            let range = self.lexer.span();
            let lexeme = self.lexer.slice();
            let start = self.location_at(range.start);
            let end = self.location_at(range.end);
            let span = Span::new(start, end);

            match result {
                Ok(Token::LineComment | Token::BlockComment) => continue,
                Ok(token) => return Some(LexicalToken::new(token, lexeme.to_string(), span)),
                Err(kind) => {
                    let reported = match kind.reports_opening() {
                        Some(width) => {
                            let mut opening_end = start;
                            opening_end.advance_str(&lexeme[..width.min(lexeme.len())]);
                            Span::new(start, opening_end)
                        }
                        None => span,
                    };
                    log::trace!("lexical error at {}: {}", reported.start, kind);
                    self.truncated |= kind.swallows_rest();
                    let recovered = kind.recovered_token();
                    self.errors.push(LexError { kind, span: reported });
                    if let Some(token) = recovered {
                        let mut tok = LexicalToken::new(token, lexeme.to_string(), span);
                        tok.flagged = true;
                        return Some(tok);
                    }
                }
            }
        }
    }

    /// Get the next token; `None` marks end of input
    pub fn next_token(&mut self) -> Option<LexicalToken> {
        match self.lookahead.pop_front() {
            Some(tok) => Some(tok),
            None => self.pull(),
        }
    }

    /// Look `k` tokens ahead without consuming anything (`peek(0)` is the
    /// next token)
    pub fn peek(&mut self, k: usize) -> Option<&LexicalToken> {
        while self.lookahead.len() <= k {
            match self.pull() {
                Some(tok) => self.lookahead.push_back(tok),
                None => break,
            }
        }
        self.lookahead.get(k)
    }

    /// Split a leading `>>` or `>>>` so that a single `>` can close a type
    /// argument list
    pub fn split_angle(&mut self) -> bool {
        let Some(front) = self.peek(0) else { return false };
        let rest = match front.token {
            Token::RShift => Token::Gt,
            Token::URShift => Token::RShift,
            Token::Ge => Token::Assign,
            Token::RShiftAssign => Token::Ge,
            _ => return false,
        };
        let Some(mut first) = self.lookahead.pop_front() else { return false };
        let mut mid = first.span.start;
        mid.advance('>');
        let second = LexicalToken::new(rest, first.lexeme[1..].to_string(), Span::new(mid, first.span.end));
        first.token = Token::Gt;
        first.lexeme = ">".to_string();
        first.span = Span::new(first.span.start, mid);
        self.lookahead.push_front(second);
        self.lookahead.push_front(first);
        true
    }

    /// True once a lexical error consumed the rest of the input
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Take the lexical errors collected so far
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Collect all remaining tokens along with every lexical error
    pub fn tokenize_all(mut self) -> (Vec<LexicalToken>, Vec<LexError>) {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token() {
            tokens.push(tok);
        }
        (tokens, self.errors)
    }

    /// Get all tokens from the source, failing on the first lexical error
    pub fn tokenize(self) -> Result<Vec<LexicalToken>, LexError> {
        let (tokens, errors) = self.tokenize_all();
        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(tokens),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexicalToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
