//! CFF DICT data: operands followed by an operator.
//!
//! Operand encodings by leading byte `b0` (Adobe TN #5176, Table 3):
//!
//! | b0         | bytes | value                              |
//! |------------|-------|------------------------------------|
//! | 32..=246   | 1     | `b0 - 139`                         |
//! | 247..=250  | 2     | `(b0 - 247) * 256 + b1 + 108`      |
//! | 251..=254  | 2     | `-(b0 - 251) * 256 - b1 - 108`     |
//! | 28         | 3     | `b1 << 8 \| b2` as i16             |
//! | 29         | 5     | `b1 << 24 \| .. \| b4` as i32      |
//! | 30         | var   | nibble-coded real                  |
//!
//! Operators are `0..=21`; `12` escapes a second byte.

use std::collections::HashMap;

use nom::error::{Error as NomError, ErrorKind};
use nom::number::complete::{be_i16, be_i32, be_u8};
use nom::IResult;

use crate::error::{Error, Result};

/// DICT operator, with escaped operators stored as `0x0C00 | b1`.
pub(crate) type Operator = u16;

pub(crate) mod op {
    use super::Operator;

    pub const WEIGHT: Operator = 4;
    pub const FONT_BBOX: Operator = 5;
    pub const STD_HW: Operator = 10;
    pub const STD_VW: Operator = 11;
    pub const CHARSET: Operator = 15;
    pub const ENCODING: Operator = 16;
    pub const CHAR_STRINGS: Operator = 17;
    pub const PRIVATE: Operator = 18;
    pub const DEFAULT_WIDTH_X: Operator = 20;
    pub const NOMINAL_WIDTH_X: Operator = 21;

    pub const IS_FIXED_PITCH: Operator = 0x0C01;
    pub const ITALIC_ANGLE: Operator = 0x0C02;
    pub const UNDERLINE_POSITION: Operator = 0x0C03;
    pub const UNDERLINE_THICKNESS: Operator = 0x0C04;
    pub const FONT_MATRIX: Operator = 0x0C07;
    pub const ROS: Operator = 0x0C1E;
    pub const FD_ARRAY: Operator = 0x0C24;
    pub const FD_SELECT: Operator = 0x0C25;
}

/// DICT operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Integer(i32),
    Real(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => f64::from(i),
            Number::Real(r) => r,
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            Number::Integer(i) => i,
            Number::Real(r) => r as i32,
        }
    }
}

fn fail<T>(input: &[u8]) -> IResult<&[u8], T> {
    Err(nom::Err::Error(NomError::new(input, ErrorKind::Verify)))
}

/// Decode one operand.
pub(crate) fn operand(input: &[u8]) -> IResult<&[u8], Number> {
    let (rest, b0) = be_u8(input)?;
    match b0 {
        32..=246 => Ok((rest, Number::Integer(i32::from(b0) - 139))),
        247..=250 => {
            let (rest, b1) = be_u8(rest)?;
            Ok((rest, Number::Integer((i32::from(b0) - 247) * 256 + i32::from(b1) + 108)))
        },
        251..=254 => {
            let (rest, b1) = be_u8(rest)?;
            Ok((rest, Number::Integer(-(i32::from(b0) - 251) * 256 - i32::from(b1) - 108)))
        },
        28 => {
            let (rest, v) = be_i16(rest)?;
            Ok((rest, Number::Integer(i32::from(v))))
        },
        29 => {
            let (rest, v) = be_i32(rest)?;
            Ok((rest, Number::Integer(v)))
        },
        30 => real(rest),
        _ => fail(input),
    }
}

/// Nibble-coded real: `0-9` digits, `a` point, `b` E, `c` E-, `e` minus, `f` end.
fn real(input: &[u8]) -> IResult<&[u8], Number> {
    let mut text = String::new();
    for (i, &byte) in input.iter().enumerate() {
        for nibble in [byte >> 4, byte & 0x0F] {
            match nibble {
                0..=9 => text.push(char::from(b'0' + nibble)),
                0xA => text.push('.'),
                0xB => text.push('E'),
                0xC => text.push_str("E-"),
                0xE => text.push('-'),
                0xF => {
                    let rest = &input[i + 1..];
                    return match text.as_str() {
                        "" => Ok((rest, Number::Real(0.0))),
                        s => s
                            .parse::<f64>()
                            .map(|v| (rest, Number::Real(v)))
                            .or_else(|_| fail(input)),
                    };
                },
                _ => return fail(input),
            }
        }
    }
    Err(nom::Err::Incomplete(nom::Needed::Unknown))
}

/// Parsed DICT: operator to its operands. Later duplicates replace earlier ones.
#[derive(Debug, Clone, Default)]
pub(crate) struct Dict {
    entries: HashMap<Operator, Vec<Number>>,
}

impl Dict {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut entries = HashMap::new();
        let mut operands = Vec::new();
        let mut input = data;

        while let Some(&b0) = input.first() {
            let offset = data.len() - input.len();
            if b0 <= 21 {
                let (rest, operator) = if b0 == 12 {
                    match input.get(1) {
                        Some(&b1) => (&input[2..], 0x0C00 | Operator::from(b1)),
                        None => return Err(Error::UnexpectedEof { offset }),
                    }
                } else {
                    (&input[1..], Operator::from(b0))
                };
                entries.insert(operator, std::mem::take(&mut operands));
                input = rest;
            } else {
                let (rest, value) = operand(input).map_err(|e| match e {
                    nom::Err::Incomplete(_) => Error::UnexpectedEof { offset },
                    _ => Error::parse(offset, format!("invalid DICT operand byte {}", b0)),
                })?;
                operands.push(value);
                input = rest;
            }
        }

        if !operands.is_empty() {
            log::warn!("DICT ends with {} dangling operands", operands.len());
        }
        Ok(Self { entries })
    }

    pub fn get(&self, op: Operator) -> Option<&[Number]> {
        self.entries.get(&op).map(Vec::as_slice)
    }

    pub fn number(&self, op: Operator) -> Option<f64> {
        self.get(op)?.first().map(|n| n.as_f64())
    }

    pub fn int(&self, op: Operator) -> Option<i32> {
        self.get(op)?.first().map(|n| n.as_i32())
    }

    /// Two-operand entries such as `Private` (size, offset).
    pub fn pair(&self, op: Operator) -> Option<(i32, i32)> {
        match self.get(op)? {
            [a, b] => Some((a.as_i32(), b.as_i32())),
            _ => None,
        }
    }

    pub fn array(&self, op: Operator) -> Option<Vec<f64>> {
        self.get(op).map(|v| v.iter().map(|n| n.as_f64()).collect())
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.entries.contains_key(&op)
    }
}
