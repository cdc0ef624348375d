//! Positional string formatting for bound labels.
//!
//! A bound label's text is a composite format string. Each format item has
//! the shape `{index[,alignment][:spec]}`:
//!
//! - `index` selects the argument (bound labels always pass exactly one).
//! - `alignment` pads to a minimum width, right-aligned when positive and
//!   left-aligned when negative.
//! - `spec` controls how numbers are written. It is ignored for strings,
//!   booleans, colors and lists.
//!
//! `{{` and `}}` produce literal braces.
//!
//! # Numeric specs
//!
//! Standard specs are a letter with an optional precision:
//!
//! | Spec | Meaning | Example (`1234.56`) |
//! |---|---|---|
//! | `F1` | fixed point | `1234.6` |
//! | `N2` | fixed point with grouping | `1,234.56` |
//! | `E3` | exponential | `1.235E+003` |
//! | `P1` | percent | `123,456.0 %` |
//! | `G3` | general (significant digits) | `1.23E+03` |
//! | `D5` | zero-padded integer (integers only) | |
//! | `X4` | hexadecimal (integers only) | |
//!
//! Anything else is a custom pattern built from `0` (digit or zero), `#`
//! (digit if present), `.`, `,` (grouping, or scaling by 1000 when placed
//! just before the point), `%`, `‰`, quoted or escaped literals, and up to
//! three `;`-separated sections for positive, negative and zero values.
//!
//! ```
//! use horizon_vscroll::binding::format;
//! use horizon_vscroll::Value;
//!
//! let text = format("${0:0.0}", &[Value::from(1.5)]).unwrap();
//! assert_eq!(text, "$1.5");
//! ```

use thiserror::Error;

use horizon_vscroll_core::Value;

/// Errors produced by malformed format strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `{` with no matching `}`.
    #[error("unclosed format item starting at byte {position}")]
    UnclosedBrace { position: usize },

    /// A single `}` outside any format item.
    #[error("unexpected `}}` at byte {position}")]
    UnexpectedClosingBrace { position: usize },

    /// The argument index is missing or not a number.
    #[error("invalid argument index in format item at byte {position}")]
    InvalidIndex { position: usize },

    /// The argument index is past the end of the argument list.
    #[error("argument index {index} out of range for {count} argument(s)")]
    IndexOutOfRange { index: usize, count: usize },

    /// The alignment component is not an integer or is too wide.
    #[error("invalid alignment in format item at byte {position}")]
    InvalidAlignment { position: usize },

    /// The spec cannot be applied to the value.
    #[error("format spec `{spec}` cannot be applied to {value}")]
    InvalidSpec { spec: String, value: &'static str },
}

/// Alignment widths and standard-spec precisions must stay below this.
const MAX_WIDTH: usize = 1_000_000;

/// Format `template`, substituting its format items with `args`.
pub fn format(template: &str, args: &[Value]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let mut body = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(FormatError::UnclosedBrace { position }),
                        _ => body.push(c),
                    }
                }
                if !closed {
                    return Err(FormatError::UnclosedBrace { position });
                }

                let item = FormatItem::parse(&body, position)?;
                let value = args.get(item.index).ok_or(FormatError::IndexOutOfRange {
                    index: item.index,
                    count: args.len(),
                })?;
                let text = format_value(value, item.spec)?;
                pad_into(&mut out, &text, item.alignment);
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_some() {
                    out.push('}');
                    continue;
                }
                return Err(FormatError::UnexpectedClosingBrace { position });
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Format a single value with a spec. An empty spec uses the value's
/// `Display` output.
pub fn format_value(value: &Value, spec: &str) -> Result<String, FormatError> {
    match value {
        Value::Int(i) if !spec.is_empty() => format_number(Number::Int(*i), spec),
        Value::Float(f) if !spec.is_empty() => format_number(Number::Float(*f), spec),
        other => Ok(other.to_string()),
    }
}

/// One parsed `{index,alignment:spec}` item.
struct FormatItem<'a> {
    index: usize,
    alignment: i32,
    spec: &'a str,
}

impl<'a> FormatItem<'a> {
    fn parse(body: &'a str, position: usize) -> Result<Self, FormatError> {
        let (head, spec) = match body.split_once(':') {
            Some((head, spec)) => (head, spec),
            None => (body, ""),
        };
        let (index, alignment) = match head.split_once(',') {
            Some((index, alignment)) => (index, Some(alignment)),
            None => (head, None),
        };

        let index = index.trim();
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::InvalidIndex { position });
        }
        let index = index
            .parse::<usize>()
            .map_err(|_| FormatError::InvalidIndex { position })?;

        let alignment = match alignment {
            Some(text) => text
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|width| (width.unsigned_abs() as usize) < MAX_WIDTH)
                .ok_or(FormatError::InvalidAlignment { position })?,
            None => 0,
        };

        Ok(Self {
            index,
            alignment,
            spec,
        })
    }
}

fn pad_into(out: &mut String, text: &str, alignment: i32) {
    let width = alignment.unsigned_abs() as usize;
    let len = text.chars().count();
    let padding = width.saturating_sub(len);

    if alignment > 0 {
        out.extend(std::iter::repeat_n(' ', padding));
        out.push_str(text);
    } else {
        out.push_str(text);
        out.extend(std::iter::repeat_n(' ', padding));
    }
}

// =========================================================================
// Numbers
// =========================================================================

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn is_negative(self) -> bool {
        match self {
            Number::Int(i) => i < 0,
            Number::Float(f) => f.is_sign_negative() && f != 0.0,
        }
    }

    fn type_name(self) -> &'static str {
        match self {
            Number::Int(_) => "int",
            Number::Float(_) => "float",
        }
    }

    /// Split `|self| * scale` into integer and fraction digits at `precision`.
    fn digits(self, precision: usize, scale: f64) -> (String, String) {
        match self {
            Number::Int(i) if scale == 1.0 => (i.unsigned_abs().to_string(), "0".repeat(precision)),
            _ => {
                let text = format!("{:.*}", precision, (self.as_f64() * scale).abs());
                match text.split_once('.') {
                    Some((int, frac)) => (int.to_string(), frac.to_string()),
                    None => (text, String::new()),
                }
            }
        }
    }
}

fn format_number(number: Number, spec: &str) -> Result<String, FormatError> {
    if let Number::Float(f) = number {
        if f.is_nan() {
            return Ok("NaN".to_string());
        }
        if f.is_infinite() {
            return Ok(if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string());
        }
    }

    match parse_standard(spec) {
        Some((letter, precision)) => format_standard(number, spec, letter, precision),
        None => Ok(format_custom(number, spec)),
    }
}

/// Recognize `letter[digits]` specs.
fn parse_standard(spec: &str) -> Option<(char, Option<usize>)> {
    let mut chars = spec.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    let rest = chars.as_str();
    if rest.len() > 9 || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let precision = if rest.is_empty() {
        None
    } else {
        rest.parse().ok()
    };
    Some((letter, precision))
}

fn format_standard(
    number: Number,
    spec: &str,
    letter: char,
    precision: Option<usize>,
) -> Result<String, FormatError> {
    let invalid = || FormatError::InvalidSpec {
        spec: spec.to_string(),
        value: number.type_name(),
    };
    if precision.is_some_and(|precision| precision >= MAX_WIDTH) {
        return Err(invalid());
    }

    let text = match letter.to_ascii_uppercase() {
        'F' => fixed(number, precision.unwrap_or(2), 1.0, false),
        'N' => fixed(number, precision.unwrap_or(2), 1.0, true),
        'P' => format!("{} %", fixed(number, precision.unwrap_or(2), 100.0, true)),
        'D' => {
            let Number::Int(i) = number else {
                return Err(invalid());
            };
            let digits = i.unsigned_abs().to_string();
            let width = precision.unwrap_or(0);
            let sign = if i < 0 { "-" } else { "" };
            format!("{sign}{digits:0>width$}")
        }
        'X' => {
            let Number::Int(i) = number else {
                return Err(invalid());
            };
            let width = precision.unwrap_or(0);
            if letter == 'x' {
                format!("{i:0width$x}")
            } else {
                format!("{i:0width$X}")
            }
        }
        'E' => exponential(number.as_f64(), precision.unwrap_or(6), letter == 'e', 3),
        'G' => general(number, precision.unwrap_or(0), letter == 'g'),
        _ => return Err(invalid()),
    };

    Ok(text)
}

fn fixed(number: Number, precision: usize, scale: f64, grouped: bool) -> String {
    let (int, frac) = number.digits(precision, scale);
    let int = if grouped { group_thousands(&int) } else { int };
    let is_zero = is_all_zero(&int) && is_all_zero(&frac);

    let mut out = String::new();
    if number.is_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&int);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn exponential(value: f64, precision: usize, lowercase: bool, min_exponent_digits: usize) -> String {
    let text = format!("{:.*e}", precision, value.abs());
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let sign = if value < 0.0 { "-" } else { "" };
    let marker = if lowercase { 'e' } else { 'E' };
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    let exponent = exponent.unsigned_abs();
    format!("{sign}{mantissa}{marker}{exponent_sign}{exponent:0>min_exponent_digits$}")
}

fn general(number: Number, precision: usize, lowercase: bool) -> String {
    if precision == 0 {
        return match number {
            Number::Int(i) => i.to_string(),
            Number::Float(f) => f.to_string(),
        };
    }

    let value = number.as_f64();
    if value == 0.0 {
        return "0".to_string();
    }

    // Exponent after rounding to the requested significant digits
    let scientific = format!("{:.*e}", precision - 1, value.abs());
    let exponent: i32 = scientific
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exponent >= -5 && exponent < precision as i32 {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        let text = format!("{:.*}", decimals, value);
        trim_fraction(&text).to_string()
    } else {
        let text = exponential(value, precision - 1, lowercase, 2);
        let marker = if lowercase { 'e' } else { 'E' };
        match text.split_once(marker) {
            Some((mantissa, exponent)) => format!("{}{marker}{exponent}", trim_fraction(mantissa)),
            None => text,
        }
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn is_all_zero(digits: &str) -> bool {
    digits.bytes().all(|b| b == b'0')
}

// =========================================================================
// Custom patterns
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// `0` when `zero`, `#` otherwise.
    Digit { zero: bool },
    Point,
    Comma,
    Percent,
    PerMille,
    Literal(String),
}

/// Split a custom pattern into its `;` sections, honoring quotes and escapes.
fn split_sections(spec: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in spec.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', None) => escaped = true,
            ('\'' | '"', None) => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            (';', None) => {
                sections.push(&spec[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    sections.push(&spec[start..]);
    sections.truncate(3);
    sections
}

fn tokenize(section: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = section.chars();
    let mut seen_point = false;

    while let Some(c) = chars.next() {
        let token = match c {
            '0' => Token::Digit { zero: true },
            '#' => Token::Digit { zero: false },
            '.' if !seen_point => {
                seen_point = true;
                Token::Point
            }
            // Only the first point counts
            '.' => continue,
            ',' => Token::Comma,
            '%' => Token::Percent,
            '‰' => Token::PerMille,
            '\\' => match chars.next() {
                Some(escaped) => Token::Literal(escaped.to_string()),
                None => continue,
            },
            '\'' | '"' => {
                let literal: String = chars.by_ref().take_while(|&next| next != c).collect();
                Token::Literal(literal)
            }
            other => Token::Literal(other.to_string()),
        };
        tokens.push(token);
    }
    tokens
}

/// Shape of one custom section, derived from its tokens.
struct Pattern {
    tokens: Vec<Token>,
    point: Option<usize>,
    int_placeholders: usize,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouping: bool,
    scale: f64,
}

impl Pattern {
    fn new(section: &str) -> Self {
        let tokens = tokenize(section);
        let point = tokens.iter().position(|t| *t == Token::Point);
        let int_end = point.unwrap_or(tokens.len());
        let (int_tokens, frac_tokens) = tokens.split_at(int_end);
        let is_digit = |t: &Token| matches!(t, Token::Digit { .. });

        let int_placeholders = int_tokens.iter().filter(|t| is_digit(t)).count();
        let min_int = int_tokens
            .iter()
            .position(|t| *t == Token::Digit { zero: true })
            .map_or(0, |first| int_tokens[first..].iter().filter(|t| is_digit(t)).count());

        let frac_digits: Vec<bool> = frac_tokens
            .iter()
            .filter_map(|t| match t {
                Token::Digit { zero } => Some(*zero),
                _ => None,
            })
            .collect();
        let max_frac = frac_digits.len();
        let min_frac = frac_digits.iter().rposition(|&zero| zero).map_or(0, |i| i + 1);

        // Commas right after the last integer placeholder scale by 1000,
        // commas between placeholders turn on grouping.
        let last_digit = int_tokens.iter().rposition(is_digit);
        let first_digit = int_tokens.iter().position(is_digit);
        let mut scale = 1.0;
        let mut grouping = false;
        if let (Some(first), Some(last)) = (first_digit, last_digit) {
            grouping = int_tokens[first..last].contains(&Token::Comma);
            let trailing = int_tokens[last + 1..]
                .iter()
                .take_while(|t| **t == Token::Comma)
                .count();
            scale /= 1000f64.powi(trailing as i32);
        }

        for token in &tokens {
            match token {
                Token::Percent => scale *= 100.0,
                Token::PerMille => scale *= 1000.0,
                _ => {}
            }
        }

        Self {
            tokens,
            point,
            int_placeholders,
            min_int,
            min_frac,
            max_frac,
            grouping,
            scale,
        }
    }

    /// Round `number` to this pattern, returning integer and fraction digits.
    fn digits(&self, number: Number) -> (String, String) {
        let (int, mut frac) = number.digits(self.max_frac, self.scale);

        while frac.len() > self.min_frac && frac.ends_with('0') {
            frac.pop();
        }

        let int = if is_all_zero(&int) && self.min_int == 0 {
            String::new()
        } else {
            let trimmed = int.trim_start_matches('0');
            let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
            format!("{trimmed:0>width$}", width = self.min_int)
        };

        (int, frac)
    }

    fn render(&self, int: &str, frac: &str) -> String {
        let int_digits: Vec<char> = int.chars().collect();
        let frac_digits: Vec<char> = frac.chars().collect();
        let len = int_digits.len();
        let excess = len.saturating_sub(self.int_placeholders);

        let mut out = String::new();
        let mut placeholder = 0usize;
        let mut frac_index = 0usize;
        let mut int_emitted = false;

        let push_int = |out: &mut String, index: usize| {
            out.push(int_digits[index]);
            let remaining = len - 1 - index;
            if self.grouping && remaining > 0 && remaining % 3 == 0 {
                out.push(',');
            }
        };

        for (i, token) in self.tokens.iter().enumerate() {
            let in_fraction = self.point.is_some_and(|p| i > p);
            match token {
                Token::Digit { .. } if !in_fraction => {
                    if placeholder == 0 {
                        for index in 0..excess {
                            push_int(&mut out, index);
                        }
                        int_emitted = true;
                    }
                    // Placeholder k lines up with digit `len - placeholders + k`
                    let aligned = (len + placeholder).checked_sub(self.int_placeholders);
                    if let Some(index) = aligned.filter(|&index| index >= excess && index < len) {
                        push_int(&mut out, index);
                    }
                    placeholder += 1;
                }
                Token::Digit { .. } => {
                    if let Some(&digit) = frac_digits.get(frac_index) {
                        out.push(digit);
                    }
                    frac_index += 1;
                }
                Token::Point => {
                    if !int_emitted {
                        for index in 0..len {
                            push_int(&mut out, index);
                        }
                        int_emitted = true;
                    }
                    if !frac_digits.is_empty() {
                        out.push('.');
                    }
                }
                Token::Comma => {}
                Token::Percent => out.push('%'),
                Token::PerMille => out.push('‰'),
                Token::Literal(text) => out.push_str(text),
            }
        }

        out
    }
}

fn format_custom(number: Number, spec: &str) -> String {
    let sections = split_sections(spec);
    let negative = number.is_negative();

    let (section, explicit_sign) = match (negative, sections.get(1)) {
        (true, Some(section)) if !section.is_empty() => (*section, true),
        _ => (sections[0], false),
    };

    let pattern = Pattern::new(section);
    let (int, frac) = pattern.digits(number);
    let is_zero = is_all_zero(&int) && is_all_zero(&frac);

    if is_zero {
        if let Some(zero_section) = sections.get(2).filter(|s| !s.is_empty()) {
            let pattern = Pattern::new(zero_section);
            let (int, frac) = pattern.digits(Number::Int(0));
            return pattern.render(&int, &frac);
        }
    }

    let body = pattern.render(&int, &frac);
    if negative && !explicit_sign && !is_zero {
        format!("-{body}")
    } else {
        body
    }
}
