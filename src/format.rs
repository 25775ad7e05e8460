//! Minimal printf-style formatter for display text.
//!
//! A conversion has the form `%<flags><width><.precision><specifier>`:
//!
//! - flags: `-` left-justifies, `+` always prints a sign, `0` pads numbers with zeros and a space
//!   prints a blank where a `+` would go.
//! - width: minimum number of characters. Longer values are never truncated.
//! - precision: minimum digits for `d`, `b`, `o`, `x` and `X`; decimals for `f` (default 6); maximum
//!   characters for `s`. A `.` without digits sets no precision.
//! - specifier: `d` decimal, `f` fixed point, `b` binary, `o` octal, `x`/`X` hex, `s` string and
//!   `%` for a literal percent sign, which consumes no argument.
//!
//! Negative values printed with `b`, `o`, `x` or `X` are shown as their 32-bit two's complement.
//! `f` rounds exact ties away from zero. `s` also prints numbers, and `d` prints the fraction of a
//! float argument.
//!
//! ```
//! use parallel_character_display::format::{sprintf, Argument};
//!
//! let text = sprintf::<16>("%05d|%-4s|", &[Argument::from(-42), Argument::from("ab")]).unwrap();
//! assert_eq!(text.as_str(), "-0042|ab  |");
//! ```
use core::fmt::{self, Write};
use core::iter::Peekable;
use core::str::Chars;

/// A value consumed by one conversion.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Argument<'a> {
    Int(i64),
    Float(f64),
    Str(&'a str),
}

macro_rules! int_argument {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Argument<'_> {
                fn from(value: $t) -> Self {
                    Argument::Int(value as i64)
                }
            }
        )*
    };
}

int_argument!(i8, i16, i32, i64, u8, u16, u32, isize, usize);

impl From<f32> for Argument<'_> {
    fn from(value: f32) -> Self {
        Argument::Float(value as f64)
    }
}

impl From<f64> for Argument<'_> {
    fn from(value: f64) -> Self {
        Argument::Float(value)
    }
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(value: &'a str) -> Self {
        Argument::Str(value)
    }
}

/// Errors returned by the formatter.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormatError {
    /// More conversions than arguments.
    NotEnoughArguments,
    /// The conversion character is not one of `% d f o s x X b`.
    UnknownSpecifier(char),
    /// The format string ends in the middle of a conversion.
    IncompleteSpecifier,
    /// A string was given to a numeric conversion.
    ArgumentType,
    /// The rendered text does not fit the output buffer.
    BufferOverflow,
}

impl From<fmt::Error> for FormatError {
    fn from(_: fmt::Error) -> Self {
        FormatError::BufferOverflow
    }
}

impl From<&FormatError> for &'static str {
    fn from(err: &FormatError) -> Self {
        match err {
            FormatError::NotEnoughArguments => "Not enough arguments for format string",
            FormatError::UnknownSpecifier(_) => "Unknown format specifier",
            FormatError::IncompleteSpecifier => "Incomplete format specifier",
            FormatError::ArgumentType => "Argument type does not match format specifier",
            FormatError::BufferOverflow => "Formatted text exceeds buffer capacity",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FormatError {
    fn format(&self, fmt: defmt::Formatter) {
        let msg: &'static str = From::from(self);
        defmt::write!(fmt, "{}", msg);
    }
}

#[cfg(feature = "ufmt")]
impl ufmt::uDisplay for FormatError {
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        let msg: &'static str = From::from(self);
        ufmt::uwrite!(w, "{}", msg)
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg: &'static str = From::from(self);
        match self {
            FormatError::UnknownSpecifier(c) => write!(f, "{} '{}'", msg, c),
            _ => write!(f, "{}", msg),
        }
    }
}

#[derive(Debug, Default)]
struct Conversion {
    left: bool,
    sign_always: bool,
    sign_space: bool,
    pad_zero: bool,
    width: usize,
    precision: Option<usize>,
}

impl Conversion {
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Self {
        let mut conversion = Conversion::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => conversion.left = true,
                '+' => conversion.sign_always = true,
                '0' => conversion.pad_zero = true,
                ' ' => conversion.sign_space = true,
                _ => break,
            }
            chars.next();
        }
        conversion.width = parse_number(chars).unwrap_or(0);
        if chars.peek() == Some(&'.') {
            chars.next();
            conversion.precision = parse_number(chars);
        }
        conversion
    }

    /// Sign character for a signed conversion.
    fn sign(&self, negative: bool) -> Option<char> {
        if negative {
            Some('-')
        } else if self.sign_always {
            Some('+')
        } else if self.sign_space {
            Some(' ')
        } else {
            None
        }
    }

    fn zero_fill(&self) -> bool {
        self.pad_zero && self.width > 0 && !self.left
    }

    /// Writes `sign` and `body` justified to the field width. With zero fill the sign goes in
    /// front of the zeros.
    fn render<W, F>(&self, out: &mut W, sign: Option<char>, zero_fill: bool, body: F) -> fmt::Result
    where
        W: Write,
        F: Fn(&mut dyn Write) -> fmt::Result,
    {
        let mut counter = CharCounter(0);
        body(&mut counter)?;
        let used = counter.0 + usize::from(sign.is_some());
        let fill = self.width.saturating_sub(used);

        if zero_fill {
            if let Some(sign) = sign {
                out.write_char(sign)?;
            }
            repeat(out, '0', fill)?;
            body(out)
        } else if self.left {
            if let Some(sign) = sign {
                out.write_char(sign)?;
            }
            body(out)?;
            repeat(out, ' ', fill)
        } else {
            repeat(out, ' ', fill)?;
            if let Some(sign) = sign {
                out.write_char(sign)?;
            }
            body(out)
        }
    }
}

struct CharCounter(usize);

impl Write for CharCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.chars().count();
        Ok(())
    }
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    value
}

fn repeat(out: &mut dyn Write, c: char, count: usize) -> fmt::Result {
    for _ in 0..count {
        out.write_char(c)?;
    }
    Ok(())
}

/// Writer that drops everything past the first `remaining` characters.
struct Truncate<'a> {
    inner: &'a mut dyn Write,
    remaining: usize,
}

impl Write for Truncate<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.remaining == 0 {
                break;
            }
            self.inner.write_char(c)?;
            self.remaining -= 1;
        }
        Ok(())
    }
}

// 2^53, above which every f64 is an even integer
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;
// widest tie rendering: 16 integer digits, the point and the decimals
const TIE_BUFFER_SIZE: usize = 80;
const MAX_TIE_DECIMALS: usize = TIE_BUFFER_SIZE - 20;

/// Whether `magnitude` lies exactly halfway between two values with `decimals` places. Such a value
/// is an odd multiple of 2^-(decimals + 1).
fn is_tie(magnitude: f64, decimals: usize) -> bool {
    if decimals > MAX_TIE_DECIMALS {
        return false;
    }
    let mut scaled = magnitude;
    for _ in 0..=decimals {
        scaled *= 2.0;
    }
    scaled < EXACT_INTEGER_LIMIT && (scaled as u64) as f64 == scaled && scaled as u64 % 2 == 1
}

/// Writes `magnitude` with `decimals` places. Exact ties round up.
fn write_fixed(out: &mut dyn Write, magnitude: f64, decimals: usize) -> fmt::Result {
    if !is_tie(magnitude, decimals) {
        return write!(out, "{:.*}", decimals, magnitude);
    }
    // a tie is exact with one more place, which is the trailing 5
    let mut text: heapless::String<TIE_BUFFER_SIZE> = heapless::String::new();
    write!(text, "{:.*}", decimals + 1, magnitude)?;
    let bytes = text.as_bytes();
    let len = bytes.len() - if decimals == 0 { 2 } else { 1 };

    // slot 0 takes a carry out of the leading digit
    let mut digits = [0u8; TIE_BUFFER_SIZE + 1];
    digits[1..=len].copy_from_slice(&bytes[..len]);
    let mut i = len;
    loop {
        match digits[i] {
            b'.' => {}
            b'9' => digits[i] = b'0',
            0 => {
                digits[i] = b'1';
                break;
            }
            digit => {
                digits[i] = digit + 1;
                break;
            }
        }
        i -= 1;
    }
    let start = usize::from(digits[0] == 0);
    let rounded = core::str::from_utf8(&digits[start..=len]).map_err(|_| fmt::Error)?;
    out.write_str(rounded)
}

fn integer(argument: &Argument<'_>) -> Result<i64, FormatError> {
    match *argument {
        Argument::Int(value) => Ok(value),
        Argument::Float(value) => Ok(value as i64),
        Argument::Str(_) => Err(FormatError::ArgumentType),
    }
}

/// Renders `format` with `args` into `out`.
pub fn write_formatted<W: Write>(
    out: &mut W,
    format: &str,
    args: &[Argument<'_>],
) -> Result<(), FormatError> {
    let mut chars = format.chars().peekable();
    let mut args = args.iter();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.write_char(c)?;
            continue;
        }
        let conversion = Conversion::parse(&mut chars);
        let specifier = chars.next().ok_or(FormatError::IncompleteSpecifier)?;
        if specifier == '%' {
            out.write_char('%')?;
            continue;
        }
        if !matches!(specifier, 'd' | 'f' | 'o' | 's' | 'x' | 'X' | 'b') {
            return Err(FormatError::UnknownSpecifier(specifier));
        }
        let argument = args.next().ok_or(FormatError::NotEnoughArguments)?;
        let precision = conversion.precision;

        match specifier {
            's' => {
                let limit = precision.unwrap_or(usize::MAX);
                conversion.render(out, None, false, |w| {
                    let mut w = Truncate {
                        inner: w,
                        remaining: limit,
                    };
                    match *argument {
                        Argument::Str(text) => w.write_str(text),
                        Argument::Int(value) => write!(w, "{}", value),
                        Argument::Float(value) => write!(w, "{}", value),
                    }
                })?;
            }
            'f' => {
                let value = match *argument {
                    Argument::Float(value) => value,
                    Argument::Int(value) => value as f64,
                    Argument::Str(_) => return Err(FormatError::ArgumentType),
                };
                let negative = value < 0.0;
                let magnitude = if negative { -value } else { value };
                let decimals = precision.unwrap_or(6);
                conversion.render(
                    out,
                    conversion.sign(negative),
                    conversion.zero_fill(),
                    |w| write_fixed(w, magnitude, decimals),
                )?;
            }
            'd' => {
                let digits = precision.unwrap_or(0);
                let zero_fill = conversion.zero_fill() && precision.is_none();
                match *argument {
                    Argument::Int(value) => {
                        let magnitude = value.unsigned_abs();
                        conversion.render(out, conversion.sign(value < 0), zero_fill, |w| {
                            write!(w, "{:0digits$}", magnitude)
                        })?;
                    }
                    Argument::Float(value) => {
                        let negative = value < 0.0;
                        let magnitude = if negative { -value } else { value };
                        conversion.render(out, conversion.sign(negative), zero_fill, |w| {
                            let mut counter = CharCounter(0);
                            write!(counter, "{}", magnitude)?;
                            repeat(w, '0', digits.saturating_sub(counter.0))?;
                            write!(w, "{}", magnitude)
                        })?;
                    }
                    Argument::Str(_) => return Err(FormatError::ArgumentType),
                }
            }
            _ => {
                // only negative values wrap to 32 bits
                let value = integer(argument)?;
                let value = if value < 0 {
                    u64::from(value as u32)
                } else {
                    value as u64
                };
                let digits = precision.unwrap_or(0);
                conversion.render(
                    out,
                    None,
                    conversion.zero_fill() && precision.is_none(),
                    |w| match specifier {
                        'b' => write!(w, "{:0digits$b}", value),
                        'o' => write!(w, "{:0digits$o}", value),
                        'x' => write!(w, "{:0digits$x}", value),
                        _ => write!(w, "{:0digits$X}", value),
                    },
                )?;
            }
        }
    }
    Ok(())
}

/// Renders `format` with `args` into a string of capacity `N`.
pub fn sprintf<const N: usize>(
    format: &str,
    args: &[Argument<'_>],
) -> Result<heapless::String<N>, FormatError> {
    let mut text = heapless::String::new();
    write_formatted(&mut text, format, args)?;
    Ok(text)
}
