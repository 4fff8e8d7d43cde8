use std::str::FromStr as _;

use rust_decimal::{Decimal, prelude::ToPrimitive as _};

use crate::foundation::error::{TesseraError, TesseraResult};

/// Loosely-typed numeric parameter as it arrives from a caller or an expression evaluator.
///
/// Integers, exact decimals and numeric strings are all accepted; every operation converts them
/// once, at its boundary, with [`Scalar::to_int_truncated`] or [`Scalar::to_decimal`]. Binary
/// floating point never enters the conversion.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Scalar {
    /// Plain integer.
    Int(i64),
    /// Exact decimal.
    Decimal(Decimal),
    /// Numeric string, parsed on conversion.
    Text(String),
}

impl Scalar {
    /// Exact decimal value of this scalar.
    pub fn to_decimal(&self, op: &str, name: &str) -> TesseraResult<Decimal> {
        match self {
            Self::Int(v) => Ok(Decimal::from(*v)),
            Self::Decimal(d) => Ok(*d),
            Self::Text(s) => parse_decimal(s.trim()).ok_or_else(|| {
                TesseraError::validation(format!("{op}: {name} must be numeric, got '{s}'"))
            }),
        }
    }

    /// Integer value, truncating any fractional part toward zero.
    pub fn to_int_truncated(&self, op: &str, name: &str) -> TesseraResult<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            _ => self.to_decimal(op, name)?.trunc().to_i64().ok_or_else(|| {
                TesseraError::validation(format!("{op}: {name} is out of integer range"))
            }),
        }
    }

    /// Truncated integer that must be `>= 0`.
    pub fn to_non_negative(&self, op: &str, name: &str) -> TesseraResult<u32> {
        let v = self.to_int_truncated(op, name)?;
        if v < 0 {
            return Err(TesseraError::validation(format!(
                "{op}: {name} must be non-negative, got {v}"
            )));
        }
        u32::try_from(v)
            .map_err(|_| TesseraError::validation(format!("{op}: {name} is too large: {v}")))
    }

    /// Truncated integer that must be `> 0`.
    pub fn to_positive(&self, op: &str, name: &str) -> TesseraResult<u32> {
        let v = self.to_non_negative(op, name)?;
        if v == 0 {
            return Err(TesseraError::validation(format!(
                "{op}: {name} must be positive, got 0"
            )));
        }
        Ok(v)
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str_exact(s)
        .or_else(|_| Decimal::from_str(s))
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

impl TryFrom<serde_json::Value> for Scalar {
    type Error = TesseraError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    return Ok(Self::Int(v));
                }
                // serde_json renders floats in their shortest round-trip form, so "0.1" stays 0.1.
                let text = n.to_string();
                parse_decimal(&text)
                    .map(Self::Decimal)
                    .ok_or_else(|| TesseraError::validation(format!("unsupported number {text}")))
            }
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            other => Err(TesseraError::validation(format!(
                "expected an integer, decimal or numeric string, got {other}"
            ))),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<Decimal> for Scalar {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/scalar.rs"]
mod tests;
