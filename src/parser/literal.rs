//! Validation and decoding of literal lexemes.
//!
//! The lexer runs these checks to report malformed literals as lexical
//! errors; the expression parser runs them again to build literal values.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("invalid numeric literal '{text}': {reason}")]
    InvalidNumber { text: String, reason: &'static str },

    #[error("numeric literal '{text}' is out of range")]
    OutOfRange { text: String },

    #[error("invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String },

    #[error("character literal must contain exactly one character")]
    BadCharLength,

    #[error("text block opening delimiter must be followed by a line break")]
    TextBlockOpening,
}

/// Decoded value of a numeric literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
}

fn invalid(text: &str, reason: &'static str) -> LiteralError {
    LiteralError::InvalidNumber { text: text.to_string(), reason }
}

fn out_of_range(text: &str) -> LiteralError {
    LiteralError::OutOfRange { text: text.to_string() }
}

/// Underscores may only separate digits
fn check_underscores(text: &str, digits: &str) -> Result<(), LiteralError> {
    if digits.starts_with('_') || digits.ends_with('_') {
        return Err(invalid(text, "underscores must appear between digits"));
    }
    Ok(())
}

fn strip_long_suffix(text: &str) -> (&str, bool) {
    match text.strip_suffix(['l', 'L']) {
        Some(rest) => (rest, true),
        None => (text, false),
    }
}

fn radix_integer(text: &str, digits: &str, radix: u32, long: bool) -> Result<NumberValue, LiteralError> {
    if digits.is_empty() {
        return Err(invalid(text, "missing digits after radix prefix"));
    }
    check_underscores(text, digits)?;
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.chars().any(|c| !c.is_digit(radix)) {
        let reason = match radix {
            2 => "binary literals may only contain 0 and 1",
            8 => "octal literals may only contain digits 0-7",
            _ => "unexpected character in hexadecimal literal",
        };
        return Err(invalid(text, reason));
    }
    // Non-decimal literals denote the two's complement bit pattern.
    if long {
        let v = u64::from_str_radix(&cleaned, radix).map_err(|_| out_of_range(text))?;
        Ok(NumberValue::Long(v as i64))
    } else {
        let v = u32::from_str_radix(&cleaned, radix).map_err(|_| out_of_range(text))?;
        Ok(NumberValue::Int(i64::from(v as i32)))
    }
}

fn is_floating(text: &str) -> bool {
    text.contains(['.', 'e', 'E']) || text.ends_with(['f', 'F', 'd', 'D'])
}

fn floating(text: &str) -> Result<NumberValue, LiteralError> {
    let (body, single) = float_suffix(text);

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(idx) => (&mantissa[..idx], Some(&mantissa[idx + 1..])),
        None => (mantissa, None),
    };
    if int_part.is_empty() && frac_part.map_or(true, str::is_empty) {
        return Err(invalid(text, "missing digits"));
    }
    for group in [Some(int_part), frac_part].into_iter().flatten() {
        if !group.is_empty() {
            check_underscores(text, group)?;
        }
    }
    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if digits.is_empty() {
            return Err(invalid(text, "exponent has no digits"));
        }
        check_underscores(text, digits)?;
    }

    let cleaned: String = body.chars().filter(|c| *c != '_').collect();
    if single {
        // parse as f32 directly to avoid double rounding
        let v: f32 = cleaned.parse().map_err(|_| invalid(text, "malformed floating-point literal"))?;
        narrow(text, f64::from(v), true)
    } else {
        let v: f64 = cleaned.parse().map_err(|_| invalid(text, "malformed floating-point literal"))?;
        narrow(text, v, false)
    }
}

/// Strip an `f`/`d` type suffix; true for `float`
fn float_suffix(text: &str) -> (&str, bool) {
    match text.chars().last() {
        Some('f' | 'F') => (&text[..text.len() - 1], true),
        Some('d' | 'D') => (&text[..text.len() - 1], false),
        _ => (text, false),
    }
}

fn narrow(text: &str, value: f64, single: bool) -> Result<NumberValue, LiteralError> {
    if single {
        let v = value as f32;
        if v.is_infinite() {
            return Err(out_of_range(text));
        }
        Ok(NumberValue::Float(f64::from(v)))
    } else if value.is_infinite() {
        Err(out_of_range(text))
    } else {
        Ok(NumberValue::Double(value))
    }
}

/// `0x1.8p1`: a hexadecimal mantissa scaled by a decimal power of two
fn hex_floating(text: &str) -> Result<NumberValue, LiteralError> {
    // exponent digits are decimal, so a trailing `f`/`d` is always a suffix
    let (body, single) = float_suffix(text);
    let Some(p) = body.find(['p', 'P']) else {
        return Err(invalid(text, "hexadecimal floating-point literal needs a binary exponent"));
    };
    let (mantissa, exponent) = (&body[2..p], &body[p + 1..]);
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(idx) => (&mantissa[..idx], &mantissa[idx + 1..]),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid(text, "missing digits"));
    }

    let mut value = 0f64;
    let mut scale: i64 = 0;
    for (group, fractional) in [(int_part, false), (frac_part, true)] {
        if group.is_empty() {
            continue;
        }
        check_underscores(text, group)?;
        for c in group.chars().filter(|c| *c != '_') {
            let digit = c
                .to_digit(16)
                .ok_or_else(|| invalid(text, "unexpected character in hexadecimal literal"))?;
            value = value * 16.0 + f64::from(digit);
            if fractional {
                scale -= 4;
            }
        }
    }

    let (negative, digits) = match exponent.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, exponent.strip_prefix('+').unwrap_or(exponent)),
    };
    if digits.is_empty() {
        return Err(invalid(text, "exponent has no digits"));
    }
    check_underscores(text, digits)?;
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.chars().any(|c| !c.is_ascii_digit()) {
        return Err(invalid(text, "binary exponent must be decimal"));
    }
    // anything past this saturates to zero or infinity either way
    let magnitude = cleaned.parse::<i64>().unwrap_or(i64::MAX).min(100_000);
    scale += if negative { -magnitude } else { magnitude };

    if value == 0.0 {
        return narrow(text, 0.0, single);
    }
    narrow(text, value * 2f64.powi(scale.clamp(-100_000, 100_000) as i32), single)
}

/// Validate and decode a numeric literal lexeme
pub fn parse_number(text: &str) -> Result<NumberValue, LiteralError> {
    let lower = text.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => {
            if text.contains(['p', 'P']) {
                return hex_floating(text);
            }
            if text.contains('.') {
                return Err(invalid(text, "hexadecimal floating-point literal needs a binary exponent"));
            }
            let (digits, long) = strip_long_suffix(&text[2..]);
            return radix_integer(text, digits, 16, long);
        }
        Some("0b") => {
            let (digits, long) = strip_long_suffix(&text[2..]);
            return radix_integer(text, digits, 2, long);
        }
        _ => {}
    }

    if is_floating(text) {
        return floating(text);
    }

    let (digits, long) = strip_long_suffix(text);
    if digits.is_empty() {
        return Err(invalid(text, "missing digits"));
    }
    if digits.chars().any(|c| !c.is_ascii_digit() && c != '_') {
        return Err(invalid(text, "unexpected character in numeric literal"));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return radix_integer(text, digits[1..].trim_start_matches('_'), 8, long);
    }
    check_underscores(text, digits)?;

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    let value: u64 = cleaned.parse().map_err(|_| out_of_range(text))?;
    // MIN_VALUE magnitudes are only legal under unary minus, which is a
    // semantic check; the parser keeps the wrapped bit pattern.
    if long {
        if value > 1u64 << 63 {
            return Err(out_of_range(text));
        }
        Ok(NumberValue::Long(value as i64))
    } else {
        if value > 1u64 << 31 {
            return Err(out_of_range(text));
        }
        Ok(NumberValue::Int(value as i64))
    }
}

/// Decode the escape sequences of a string or character literal body
/// (the text between the quotes)
pub fn unescape(body: &str) -> Result<String, LiteralError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut pending_high: Option<u16> = None;

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            flush_surrogate(&mut out, &mut pending_high);
            out.push(ch);
            continue;
        }
        let Some(next) = chars.next() else {
            return Err(LiteralError::InvalidEscape { sequence: "\\".to_string() });
        };
        let decoded = match next {
            'b' => '\u{8}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{c}',
            'r' => '\r',
            's' => ' ',
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            // line continuation, only reachable inside text blocks
            '\n' => {
                flush_surrogate(&mut out, &mut pending_high);
                continue;
            }
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                let max_len = if next <= '3' { 3 } else { 2 };
                let mut len = 1;
                while len < max_len {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                            len += 1;
                        }
                        None => break,
                    }
                }
                char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                let unit = if hex.len() == 4 {
                    u16::from_str_radix(&hex, 16).ok()
                } else {
                    None
                };
                let Some(unit) = unit else {
                    return Err(LiteralError::InvalidEscape { sequence: format!("\\u{hex}") });
                };
                match unit {
                    0xD800..=0xDBFF => {
                        flush_surrogate(&mut out, &mut pending_high);
                        pending_high = Some(unit);
                        continue;
                    }
                    0xDC00..=0xDFFF => {
                        if let Some(high) = pending_high.take() {
                            let combined = 0x10000
                                + ((u32::from(high) - 0xD800) << 10)
                                + (u32::from(unit) - 0xDC00);
                            out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                        } else {
                            out.push(char::REPLACEMENT_CHARACTER);
                        }
                        continue;
                    }
                    _ => char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER),
                }
            }
            other => {
                return Err(LiteralError::InvalidEscape { sequence: format!("\\{other}") });
            }
        };
        flush_surrogate(&mut out, &mut pending_high);
        out.push(decoded);
    }
    flush_surrogate(&mut out, &mut pending_high);
    Ok(out)
}

fn flush_surrogate(out: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}

fn is_blank_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn is_blank_line(line: &str) -> bool {
    line.chars().all(is_blank_char)
}

/// Value of a `"""` text block lexeme. Incidental indentation and trailing
/// blanks are stripped line by line before escapes are interpreted.
pub fn decode_text_block(lexeme: &str) -> Result<String, LiteralError> {
    let inner = lexeme.strip_prefix("\"\"\"").unwrap_or(lexeme);
    let inner = inner.strip_suffix("\"\"\"").unwrap_or(inner);
    let Some(first_break) = inner.find(['\n', '\r']) else {
        return Err(LiteralError::TextBlockOpening);
    };
    if !inner[..first_break].chars().all(is_blank_char) {
        return Err(LiteralError::TextBlockOpening);
    }
    let content = &inner[first_break..];
    let content = content
        .strip_prefix("\r\n")
        .or_else(|| content.strip_prefix(['\n', '\r']))
        .unwrap_or(content);
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<&str> = normalized.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    // the closing delimiter's line counts even when blank
    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| *i == last || !is_blank_line(line))
        .map(|(_, line)| line.chars().take_while(|c| is_blank_char(*c)).count())
        .min()
        .unwrap_or(0);

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| {
            if is_blank_line(line) {
                return "";
            }
            let body = line.char_indices().nth(indent).map_or("", |(at, _)| &line[at..]);
            body.trim_end_matches(is_blank_char)
        })
        .collect();
    unescape(&stripped.join("\n"))
}

/// Decode a character literal body into its single char
pub fn decode_char(body: &str) -> Result<char, LiteralError> {
    let decoded = unescape(body)?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LiteralError::BadCharLength),
    }
}

/// Strip the surrounding quote characters from a literal lexeme, tolerating
/// a missing closing quote
pub fn literal_body(lexeme: &str, quote: char) -> &str {
    let inner = lexeme.strip_prefix(quote).unwrap_or(lexeme);
    inner.strip_suffix(quote).unwrap_or(inner)
}
