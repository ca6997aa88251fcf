//! Null-aware cross-domain value comparison.
//!
//! `compare` returns `Ok(None)` when either operand is NULL: the pair is
//! incomparable and callers propagate the result as ternary-unknown, never
//! as an error. Mixed signed/unsigned integer comparison is special-cased
//! so that a negative signed value is never cast to unsigned.

use std::cmp::Ordering;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::types::{DataType, FieldType, Value};

/// Coercion domain an overloaded comparison-like operation is resolved
/// into. One specialized evaluator exists per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpDomain {
    SignedInt,
    UnsignedInt,
    MixedInt,
    Float,
    Decimal,
    Bytes,
    Tuple,
}

/// Deduces the single comparison domain of an argument list from the
/// declared types. String arguments win over numeric ones; any float
/// widens the whole comparison to float; integral arguments only split
/// into the all-signed, all-unsigned, and mixed-sign domains.
pub fn deduce_cmp_domain(types: &[&FieldType]) -> CmpDomain {
    if types.iter().any(|ft| ft.data_type == DataType::Tuple) {
        return CmpDomain::Tuple;
    }
    if types.iter().any(|ft| ft.is_stringy()) {
        return CmpDomain::Bytes;
    }
    if types.iter().any(|ft| ft.data_type == DataType::Float64) {
        return CmpDomain::Float;
    }
    if types.iter().any(|ft| ft.data_type == DataType::Decimal) {
        return CmpDomain::Decimal;
    }
    let unsigned = types.iter().filter(|ft| ft.is_unsigned_integral()).count();
    if unsigned == types.len() {
        CmpDomain::UnsignedInt
    } else if unsigned == 0 {
        CmpDomain::SignedInt
    } else {
        CmpDomain::MixedInt
    }
}

/// Compares two values, `Ok(None)` meaning "incomparable due to NULL".
pub fn compare(a: &Value, b: &Value) -> Result<Option<Ordering>> {
    if a.is_null() || b.is_null() {
        return Ok(None);
    }

    let ord = match (a, b) {
        (Value::Int64(x), Value::Int64(y)) => x.cmp(y),
        (Value::UInt64(x), Value::UInt64(y)) => x.cmp(y),
        (Value::Int64(x), Value::UInt64(y)) => cmp_signed_unsigned(*x, *y),
        (Value::UInt64(x), Value::Int64(y)) => cmp_signed_unsigned(*y, *x).reverse(),

        (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Value::String(x), Value::Bytes(y)) => x.as_bytes().cmp(&y[..]),
        (Value::Bytes(x), Value::String(y)) => x[..].cmp(y.as_bytes()),
        (Value::Bytes(x), Value::Bytes(y)) => x.cmp(y),

        // Text vs numeric must resolve before the float widening below:
        // unparseable text falls back to byte order, it never errors.
        (Value::String(x), _) => return cmp_text_numeric(x.as_bytes(), b, false),
        (Value::Bytes(x), _) => return cmp_text_numeric(x, b, false),
        (_, Value::String(y)) => return cmp_text_numeric(y.as_bytes(), a, true),
        (_, Value::Bytes(y)) => return cmp_text_numeric(y, a, true),

        (Value::Float64(_), _) | (_, Value::Float64(_)) => return cmp_as_float(a, b),

        (Value::Decimal(x), Value::Decimal(y)) => parse_decimal(x)?.cmp(&parse_decimal(y)?),
        (Value::Decimal(x), Value::Int64(y)) => parse_decimal(x)?.cmp(&Decimal::from(*y)),
        (Value::Decimal(x), Value::UInt64(y)) => parse_decimal(x)?.cmp(&Decimal::from(*y)),
        (Value::Int64(x), Value::Decimal(y)) => Decimal::from(*x).cmp(&parse_decimal(y)?),
        (Value::UInt64(x), Value::Decimal(y)) => Decimal::from(*x).cmp(&parse_decimal(y)?),

        (Value::Tuple(x), Value::Tuple(y)) => return cmp_tuples(x, y),

        _ => {
            return Err(Error::type_mismatch(
                a.data_type().to_string(),
                b.data_type().to_string(),
            ))
        }
    };
    Ok(Some(ord))
}

/// Signed vs unsigned without truncation: a negative signed value is
/// smaller than every unsigned value, otherwise both fit in u64.
fn cmp_signed_unsigned(signed: i64, unsigned: u64) -> Ordering {
    if signed < 0 {
        Ordering::Less
    } else {
        (signed as u64).cmp(&unsigned)
    }
}

/// Widens both sides to f64. Precision loss on large 64-bit integers is
/// the documented semantics of float-domain comparison.
fn cmp_as_float(a: &Value, b: &Value) -> Result<Option<Ordering>> {
    let x = value_to_f64(a)?;
    let y = value_to_f64(b)?;
    Ok(Some(OrderedFloat(x).cmp(&OrderedFloat(y))))
}

fn value_to_f64(v: &Value) -> Result<f64> {
    if let Some(f) = v.as_f64() {
        return Ok(f);
    }
    match v {
        Value::Decimal(d) => parse_decimal(d)?
            .to_f64()
            .ok_or_else(|| Error::invalid_decimal(d.clone())),
        other => Err(Error::type_mismatch(
            "FLOAT64",
            other.data_type().to_string(),
        )),
    }
}

/// Text against a numeric operand. If the text parses cleanly in the
/// numeric side's domain the comparison is numeric; otherwise the numeric
/// side is rendered in its canonical text form and the comparison falls
/// back to byte order. `flipped` restores the caller's operand order.
fn cmp_text_numeric(raw: &[u8], numeric: &Value, flipped: bool) -> Result<Option<Ordering>> {
    let s = String::from_utf8_lossy(raw);
    let parsed = match numeric {
        Value::Int64(y) => s.trim().parse::<i64>().ok().map(|x| x.cmp(y)),
        Value::UInt64(y) => s.trim().parse::<u64>().ok().map(|x| x.cmp(y)),
        Value::Float64(y) => s
            .trim()
            .parse::<f64>()
            .ok()
            .map(|x| OrderedFloat(x).cmp(y)),
        Value::Decimal(y) => match Decimal::from_str(s.trim()) {
            Ok(x) => Some(x.cmp(&parse_decimal(y)?)),
            Err(_) => None,
        },
        other => {
            return Err(Error::type_mismatch(
                "numeric",
                other.data_type().to_string(),
            ))
        }
    };
    let ord = match parsed {
        Some(ord) => ord,
        None => raw.cmp(numeric.to_text().as_bytes()),
    };
    Ok(Some(if flipped { ord.reverse() } else { ord }))
}

/// Element-wise tuple comparison. A null-incomparable element seen before
/// any deciding element makes the whole pair incomparable.
fn cmp_tuples(a: &[Value], b: &[Value]) -> Result<Option<Ordering>> {
    if a.len() != b.len() {
        return Err(Error::type_mismatch(
            format!("TUPLE of {}", a.len()),
            format!("TUPLE of {}", b.len()),
        ));
    }
    for (x, y) in a.iter().zip(b.iter()) {
        match compare(x, y)? {
            None => return Ok(None),
            Some(Ordering::Equal) => continue,
            Some(ord) => return Ok(Some(ord)),
        }
    }
    Ok(Some(Ordering::Equal))
}

fn parse_decimal(text: &str) -> Result<Decimal> {
    Decimal::from_str(text.trim()).map_err(|_| Error::invalid_decimal(text))
}
