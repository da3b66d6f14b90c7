//! Contract ABI encoding of typed call parameters.
//!
//! Type strings are parsed and packed by `ethabi`; this module only turns
//! JSON argument values into `ethabi` tokens.

use error_stack::{IntoReport, Report, Result, ResultExt};
use ethabi::param_type::Reader;
use ethabi::{Address, ParamType, Token, Uint};
use serde_json::Value;
use thiserror::Error;

use crate::tools::strip_hex_prefix;

static ADDRESS_BYTES: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("invalid type: {0}")]
    InvalidType(String),
    #[error("types/values length mismatch (count={types}, value={values})")]
    LengthMismatch { types: usize, values: usize },
    #[error("invalid {kind} value: {value}")]
    InvalidValue { kind: String, value: String },
    #[error("value out-of-bounds for {kind}: {value}")]
    OutOfBounds { kind: String, value: String },
}

pub trait AbiEncoder: Send + Sync {
    /// Packs `values` according to `types`; the result is `0x` prefixed.
    fn encode(&self, types: &[String], values: &[Value]) -> Result<String, AbiError>;
}

/// Parses a Solidity type name such as `uint256`, `address[2][]` or
/// `tuple(uint256,string)`.
pub fn parse_type(kind: &str) -> Result<ParamType, AbiError> {
    let kind = kind.trim();
    let invalid = || AbiError::InvalidType(kind.to_string());

    let name = match kind.strip_prefix("tuple") {
        Some(rest) if rest.starts_with('(') => rest,
        _ => kind,
    };
    if name.ends_with(']') && !name.contains('[') {
        return Err(Report::new(invalid()));
    }

    let param = Reader::read(name)
        .into_report()
        .change_context_lazy(invalid)?;
    if !is_supported(&param) {
        return Err(Report::new(invalid()));
    }
    Ok(param)
}

fn is_supported(param: &ParamType) -> bool {
    match param {
        ParamType::Uint(bits) | ParamType::Int(bits) => {
            *bits > 0 && *bits <= 256 && bits % 8 == 0
        }
        ParamType::FixedBytes(size) => (1..=32).contains(size),
        ParamType::Array(inner) | ParamType::FixedArray(inner, _) => is_supported(inner),
        ParamType::Tuple(members) => members.iter().all(is_supported),
        _ => true,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StandardAbiEncoder;

impl AbiEncoder for StandardAbiEncoder {
    fn encode(&self, types: &[String], values: &[Value]) -> Result<String, AbiError> {
        if types.len() != values.len() {
            return Err(Report::new(AbiError::LengthMismatch {
                types: types.len(),
                values: values.len(),
            }));
        }

        let mut tokens = Vec::with_capacity(types.len());
        for (kind, value) in types.iter().zip(values) {
            let kind = parse_type(kind)?;
            tokens.push(tokenize(&kind, value)?);
        }

        Ok(format!("0x{}", hex::encode(ethabi::encode(&tokens))))
    }
}

fn invalid_value(kind: &ParamType, value: &Value) -> Report<AbiError> {
    Report::new(AbiError::InvalidValue {
        kind: kind.to_string(),
        value: value.to_string(),
    })
}

fn out_of_bounds(kind: &ParamType, value: &Value) -> Report<AbiError> {
    Report::new(AbiError::OutOfBounds {
        kind: kind.to_string(),
        value: value.to_string(),
    })
}

/// Items of an array or tuple value, checked against the declared count
/// before any of them is converted.
fn sequence<'a>(
    kind: &ParamType,
    value: &'a Value,
    expected: Option<usize>,
) -> Result<&'a Vec<Value>, AbiError> {
    let items = value.as_array().ok_or_else(|| invalid_value(kind, value))?;
    match expected {
        Some(count) if items.len() != count => Err(invalid_value(kind, value)),
        _ => Ok(items),
    }
}

fn tokenize_all(kind: &ParamType, items: &[Value]) -> Result<Vec<Token>, AbiError> {
    items.iter().map(|item| tokenize(kind, item)).collect()
}

fn tokenize(kind: &ParamType, value: &Value) -> Result<Token, AbiError> {
    match kind {
        ParamType::Uint(bits) => {
            let (negative, magnitude) =
                parse_integer(value).ok_or_else(|| invalid_value(kind, value))?;
            if negative && !magnitude.is_zero() {
                return Err(out_of_bounds(kind, value));
            }
            if *bits < 256 && magnitude >= (Uint::one() << *bits) {
                return Err(out_of_bounds(kind, value));
            }
            Ok(Token::Uint(magnitude))
        }
        ParamType::Int(bits) => {
            let (negative, magnitude) =
                parse_integer(value).ok_or_else(|| invalid_value(kind, value))?;
            let bound = Uint::one() << (*bits - 1);
            if (negative && magnitude > bound) || (!negative && magnitude >= bound) {
                return Err(out_of_bounds(kind, value));
            }
            let number = if negative {
                (!magnitude).overflowing_add(Uint::one()).0
            } else {
                magnitude
            };
            Ok(Token::Int(number))
        }
        ParamType::Address => {
            let text = value.as_str().ok_or_else(|| invalid_value(kind, value))?;
            let bytes = hex::decode(strip_hex_prefix(text)).map_err(|_| invalid_value(kind, value))?;
            if bytes.len() != ADDRESS_BYTES {
                return Err(invalid_value(kind, value));
            }
            Ok(Token::Address(Address::from_slice(&bytes)))
        }
        ParamType::Bool => value
            .as_bool()
            .map(Token::Bool)
            .ok_or_else(|| invalid_value(kind, value)),
        ParamType::FixedBytes(size) => {
            let bytes = decode_bytes(kind, value)?;
            if bytes.len() != *size {
                return Err(invalid_value(kind, value));
            }
            Ok(Token::FixedBytes(bytes))
        }
        ParamType::Bytes => decode_bytes(kind, value).map(Token::Bytes),
        ParamType::String => value
            .as_str()
            .map(|text| Token::String(text.to_string()))
            .ok_or_else(|| invalid_value(kind, value)),
        ParamType::Array(inner) => {
            let items = sequence(kind, value, None)?;
            tokenize_all(inner, items).map(Token::Array)
        }
        ParamType::FixedArray(inner, size) => {
            let items = sequence(kind, value, Some(*size))?;
            tokenize_all(inner, items).map(Token::FixedArray)
        }
        ParamType::Tuple(members) => {
            let items = sequence(kind, value, Some(members.len()))?;
            members
                .iter()
                .zip(items)
                .map(|(member, item)| tokenize(member, item))
                .collect::<Result<Vec<Token>, AbiError>>()
                .map(Token::Tuple)
        }
    }
}

/// Sign and magnitude of an integer given as a JSON number, a decimal
/// string or a `0x` hex string.
fn parse_integer(value: &Value) -> Option<(bool, Uint)> {
    match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                return Some((false, Uint::from(unsigned)));
            }
            let signed = number.as_i64()?;
            Some((signed < 0, Uint::from(signed.unsigned_abs())))
        }
        Value::String(text) => {
            let text = text.trim();
            let (negative, digits) = match text.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, text),
            };
            if digits.is_empty() {
                return None;
            }
            let magnitude = if digits.starts_with("0x") || digits.starts_with("0X") {
                Uint::from_str_radix(&digits[2..], 16).ok()?
            } else {
                if !digits.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                Uint::from_dec_str(digits).ok()?
            };
            Some((negative, magnitude))
        }
        _ => None,
    }
}

fn decode_bytes(kind: &ParamType, value: &Value) -> Result<Vec<u8>, AbiError> {
    match value {
        Value::String(text) if text.starts_with("0x") || text.starts_with("0X") => {
            hex::decode(strip_hex_prefix(text)).map_err(|_| invalid_value(kind, value))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .filter(|byte| *byte <= u8::MAX as u64)
                    .map(|byte| byte as u8)
                    .ok_or_else(|| invalid_value(kind, value))
            })
            .collect(),
        _ => Err(invalid_value(kind, value)),
    }
}
