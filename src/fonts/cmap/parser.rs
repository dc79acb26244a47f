//! CMap stream parser.
//!
//! CMap files are a restricted PostScript program. The tokenizer (built on `nom`)
//! splits the stream into hex strings, literal strings, numbers, names, array and
//! dictionary delimiters and operator keywords; the interpreter then keeps an
//! operand stack and acts on the operators that define the table:
//!
//! ```text
//! 1 begincodespacerange <00> <FF> endcodespacerange
//! 2 beginbfchar <01> <0041> <02> /B endbfchar
//! 1 beginbfrange <10> <12> [<0061> <0062> <0063>] endbfrange
//! 1 begincidrange <0000> <00FF> 1 endcidrange
//! /UniJIS-UCS2-H usecmap
//! /CMapName /Custom def
//! ```
//!
//! Everything else (`findresource`, `begincmap`, the `CIDSystemInfo` dictionary)
//! is consumed and ignored. Entries that cannot be represented (ligatures,
//! oversized ranges, codes longer than four bytes) are skipped with a warning, or
//! rejected in strict mode.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while, take_while1};
use nom::character::complete::{char as nom_char, multispace1};
use nom::combinator::{map, opt, recognize, value};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

use super::{predefined, CMap, CMapKind, CharCode, CodespaceRange};
use crate::error::{Error, Result};
use crate::fonts::glyph_list;

/// Largest range a single `bfrange`/`cidrange` entry may enumerate.
const MAX_RANGE_LEN: u32 = 0x10000;

/// One lexical token of a CMap stream.
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Hex(Vec<u8>),
    Literal(Vec<u8>),
    Integer(i64),
    Real(f64),
    Name(String),
    ArrayStart,
    ArrayEnd,
    DictStart,
    DictEnd,
    ProcStart,
    ProcEnd,
    Operator(String),
    /// Completed `[ ... ]`, built by the interpreter
    Array(Vec<Token>),
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
}

fn is_regular(b: u8) -> bool {
    !b.is_ascii_whitespace() && b != 0 && !is_delimiter(b)
}

fn comment(input: &[u8]) -> IResult<&[u8], ()> {
    value((), pair(nom_char('%'), take_till(|b| b == b'\n' || b == b'\r')))(input)
}

fn skip_space(input: &[u8]) -> IResult<&[u8], ()> {
    value(
        (),
        many0(alt((value((), multispace1), comment, value((), nom_char('\0'))))),
    )(input)
}

fn hex_string(input: &[u8]) -> IResult<&[u8], Token> {
    map(
        delimited(
            nom_char('<'),
            take_while(|b: u8| b.is_ascii_hexdigit() || b.is_ascii_whitespace()),
            nom_char('>'),
        ),
        |digits: &[u8]| {
            let nibbles: Vec<u8> = digits
                .iter()
                .filter(|b| b.is_ascii_hexdigit())
                .map(|&b| match b {
                    b'0'..=b'9' => b - b'0',
                    b'a'..=b'f' => b - b'a' + 10,
                    _ => b - b'A' + 10,
                })
                .collect();
            // An odd trailing nibble is padded with 0
            let bytes = nibbles
                .chunks(2)
                .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
                .collect();
            Token::Hex(bytes)
        },
    )(input)
}

fn literal_string(input: &[u8]) -> IResult<&[u8], Token> {
    let (mut rest, _) = nom_char('(')(input)?;
    let mut out = Vec::new();
    let mut depth = 1;
    loop {
        let Some((&b, tail)) = rest.split_first() else {
            return Err(nom::Err::Error(nom::error::Error::new(
                rest,
                nom::error::ErrorKind::Char,
            )));
        };
        rest = tail;
        match b {
            b'\\' => {
                if let Some((&escaped, tail)) = rest.split_first() {
                    rest = tail;
                    out.push(match escaped {
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        other => other,
                    });
                }
            },
            b'(' => {
                depth += 1;
                out.push(b);
            },
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((rest, Token::Literal(out)));
                }
                out.push(b);
            },
            _ => out.push(b),
        }
    }
}

fn number(input: &[u8]) -> IResult<&[u8], Token> {
    let (rest, text) = recognize(tuple((
        opt(alt((nom_char('+'), nom_char('-')))),
        alt((
            recognize(pair(
                take_while1(|b: u8| b.is_ascii_digit()),
                opt(pair(nom_char('.'), take_while(|b: u8| b.is_ascii_digit()))),
            )),
            recognize(pair(nom_char('.'), take_while1(|b: u8| b.is_ascii_digit()))),
        )),
    )))(input)?;
    // `12abc` is a keyword, not a number
    if rest.first().is_some_and(|&b| is_regular(b)) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }
    let text = String::from_utf8_lossy(text);
    let token = match text.parse::<i64>() {
        Ok(i) => Token::Integer(i),
        Err(_) => Token::Real(text.parse().unwrap_or(0.0)),
    };
    Ok((rest, token))
}

fn name(input: &[u8]) -> IResult<&[u8], Token> {
    map(preceded(nom_char('/'), take_while(is_regular)), |n: &[u8]| {
        Token::Name(String::from_utf8_lossy(n).into_owned())
    })(input)
}

fn keyword(input: &[u8]) -> IResult<&[u8], Token> {
    map(take_while1(is_regular), |k: &[u8]| {
        Token::Operator(String::from_utf8_lossy(k).into_owned())
    })(input)
}

fn token(input: &[u8]) -> IResult<&[u8], Token> {
    alt((
        value(Token::DictStart, tag("<<")),
        value(Token::DictEnd, tag(">>")),
        hex_string,
        literal_string,
        value(Token::ArrayStart, nom_char('[')),
        value(Token::ArrayEnd, nom_char(']')),
        value(Token::ProcStart, nom_char('{')),
        value(Token::ProcEnd, nom_char('}')),
        name,
        number,
        keyword,
    ))(input)
}

/// Value of a `bf` destination: the single scalar of a UTF-16BE string.
///
/// Strings of several scalars (ligatures such as `<00660069>`) have no single
/// value and yield `None`.
fn bf_value(bytes: &[u8]) -> Option<u32> {
    if bytes.len() % 2 == 1 {
        return Some(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)));
    }
    let units = bytes.chunks(2).map(|u| u16::from_be_bytes([u[0], u[1]]));
    let scalars: Vec<_> = char::decode_utf16(units).collect();
    match scalars.as_slice() {
        [Ok(c)] => Some(*c as u32),
        _ => None,
    }
}

/// Operand-stack machine over the token stream.
struct Interpreter {
    cmap: CMap,
    stack: Vec<Token>,
    strict: bool,
    saw_bf: bool,
    saw_cid: bool,
    cmap_type: Option<i64>,
}

impl Interpreter {
    fn new(strict: bool) -> Self {
        Self {
            cmap: CMap::new("", CMapKind::Cid),
            stack: Vec::new(),
            strict,
            saw_bf: false,
            saw_cid: false,
            cmap_type: None,
        }
    }

    /// Report a skipped entry; an error in strict mode.
    fn anomaly(&self, offset: usize, reason: String) -> Result<()> {
        if self.strict {
            return Err(Error::parse(offset, reason));
        }
        log::warn!("CMap: {} (byte {})", reason, offset);
        Ok(())
    }

    fn push(&mut self, token: Token) {
        if token == Token::ArrayEnd {
            let start = self
                .stack
                .iter()
                .rposition(|t| *t == Token::ArrayStart)
                .unwrap_or(self.stack.len());
            let items = self.stack.split_off(start);
            self.stack
                .push(Token::Array(items.into_iter().skip(1).collect()));
        } else {
            self.stack.push(token);
        }
    }

    fn operator(&mut self, op: &str, offset: usize) -> Result<()> {
        match op {
            "endcodespacerange" => self.codespace_ranges(offset)?,
            "endbfchar" => {
                self.saw_bf = true;
                self.chars(offset, true)?;
            },
            "endcidchar" => {
                self.saw_cid = true;
                self.chars(offset, false)?;
            },
            "endbfrange" => {
                self.saw_bf = true;
                self.ranges(offset, true)?;
            },
            "endcidrange" => {
                self.saw_cid = true;
                self.ranges(offset, false)?;
            },
            "def" => self.def(),
            "usecmap" => {
                if let Some(Token::Name(base)) = self.stack.pop() {
                    match predefined::get(&base) {
                        Some(base) => self.cmap.use_base(base),
                        None => self.anomaly(offset, format!("unknown base CMap '{}'", base))?,
                    }
                }
            },
            _ => {},
        }
        self.stack.clear();
        Ok(())
    }

    fn def(&mut self) {
        let n = self.stack.len();
        if n < 2 {
            return;
        }
        match (&self.stack[n - 2], &self.stack[n - 1]) {
            (Token::Name(key), Token::Name(v)) if key == "CMapName" => self.cmap.name = v.clone(),
            (Token::Name(key), Token::Integer(v)) if key == "WMode" => self.cmap.wmode = (*v != 0) as u8,
            (Token::Name(key), Token::Integer(v)) if key == "CMapType" => self.cmap_type = Some(*v),
            _ => {},
        }
    }

    fn code(&self, token: &Token, offset: usize) -> Result<Option<CharCode>> {
        match token {
            Token::Hex(bytes) => match CharCode::new(bytes) {
                Some(code) => Ok(Some(code)),
                None => {
                    self.anomaly(offset, format!("code of {} bytes", bytes.len()))?;
                    Ok(None)
                },
            },
            other => {
                self.anomaly(offset, format!("expected hex code, found {:?}", other))?;
                Ok(None)
            },
        }
    }

    /// Destination value of a char entry.
    fn destination(&self, token: &Token, bf: bool, offset: usize) -> Result<Option<u32>> {
        let value = match token {
            Token::Hex(bytes) if bf => bf_value(bytes),
            Token::Hex(bytes) if bytes.len() <= 4 => {
                Some(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
            },
            Token::Integer(i) => u32::try_from(*i).ok(),
            Token::Name(n) => glyph_list::name_to_unicode(n).map(|c| c as u32),
            _ => None,
        };
        if value.is_none() {
            self.anomaly(offset, format!("unusable destination {:?}", token))?;
        }
        Ok(value)
    }

    fn codespace_ranges(&mut self, offset: usize) -> Result<()> {
        let operands = std::mem::take(&mut self.stack);
        for pair in operands.chunks(2) {
            let [lo, hi] = pair else {
                return self.anomaly(offset, "odd codespace operand count".to_string());
            };
            if let (Some(low), Some(high)) = (self.code(lo, offset)?, self.code(hi, offset)?) {
                if low.len() == high.len() {
                    self.cmap.codespaces.push(CodespaceRange { low, high });
                } else {
                    self.anomaly(offset, format!("codespace {} {} mixes lengths", low, high))?;
                }
            }
        }
        Ok(())
    }

    fn chars(&mut self, offset: usize, bf: bool) -> Result<()> {
        let operands = std::mem::take(&mut self.stack);
        for pair in operands.chunks(2) {
            let [src, dst] = pair else {
                return self.anomaly(offset, "odd char operand count".to_string());
            };
            let Some(code) = self.code(src, offset)? else {
                continue;
            };
            if let Some(value) = self.destination(dst, bf, offset)? {
                log::trace!("CMap char {} -> {:#X}", code, value);
                self.cmap.insert(code, value);
            }
        }
        Ok(())
    }

    fn ranges(&mut self, offset: usize, bf: bool) -> Result<()> {
        let operands = std::mem::take(&mut self.stack);
        for triple in operands.chunks(3) {
            let [lo, hi, dst] = triple else {
                return self.anomaly(offset, "range operands not a multiple of 3".to_string());
            };
            let (Some(lo), Some(hi)) = (self.code(lo, offset)?, self.code(hi, offset)?) else {
                continue;
            };
            if lo.len() != hi.len() || hi < lo {
                self.anomaly(offset, format!("malformed range {} {}", lo, hi))?;
                continue;
            }
            let count = u64::from(hi.value()) - u64::from(lo.value()) + 1;
            if count > u64::from(MAX_RANGE_LEN) {
                self.anomaly(offset, format!("range {} {} too large", lo, hi))?;
                continue;
            }

            if let Token::Array(items) = dst {
                let mut code = Some(lo);
                for item in items {
                    let Some(c) = code.filter(|c| *c <= hi) else {
                        break;
                    };
                    if let Some(value) = self.destination(item, bf, offset)? {
                        self.cmap.insert(c, value);
                    }
                    code = c.next();
                }
                continue;
            }

            let Some(start) = self.destination(dst, bf, offset)? else {
                continue;
            };
            log::trace!("CMap range {} {} -> {:#X}", lo, hi, start);
            let mut code = Some(lo);
            let mut value = start;
            while let Some(c) = code.filter(|c| *c <= hi) {
                self.cmap.insert(c, value);
                value = value.wrapping_add(1);
                code = c.next();
            }
        }
        Ok(())
    }

    fn finish(mut self) -> CMap {
        self.cmap.kind = if self.saw_bf {
            CMapKind::Unicode
        } else if self.saw_cid {
            CMapKind::Cid
        } else if self.cmap_type == Some(2) {
            CMapKind::Unicode
        } else {
            self.cmap.kind
        };
        self.cmap
    }
}

fn run(data: &[u8], strict: bool) -> Result<CMap> {
    let mut interp = Interpreter::new(strict);
    let mut input = data;

    loop {
        let (rest, _) = skip_space(input).unwrap_or((input, ()));
        input = rest;
        if input.is_empty() {
            break;
        }
        let offset = data.len() - input.len();
        match token(input) {
            Ok((rest, Token::Operator(op))) => {
                interp.operator(&op, offset)?;
                input = rest;
            },
            Ok((rest, tok)) => {
                interp.push(tok);
                input = rest;
            },
            Err(_) => {
                interp.anomaly(offset, format!("unexpected byte {:#04X}", input[0]))?;
                input = &input[1..];
            },
        }
    }

    let cmap = interp.finish();
    log::debug!(
        "Parsed CMap '{}': {} mappings, {} codespace ranges",
        cmap.name,
        cmap.len(),
        cmap.codespaces.len()
    );
    Ok(cmap)
}

/// Parse a CMap stream, skipping entries it cannot use.
pub fn parse(data: &[u8]) -> Result<CMap> {
    run(data, false)
}

/// Parse a CMap stream, failing on the first malformed entry.
pub fn parse_strict(data: &[u8]) -> Result<CMap> {
    run(data, true)
}
