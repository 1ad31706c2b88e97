use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A byte size written either as a plain number or with a `k`/`m` suffix
/// (`512`, `"4k"`, `"1m"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Bytes(usize),
    Text(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid size '{0}'")]
pub struct InvalidSize(pub String);

impl SizeSpec {
    pub fn bytes(&self) -> Result<usize, InvalidSize> {
        match self {
            SizeSpec::Bytes(n) => Ok(*n),
            SizeSpec::Text(s) => parse_size(s),
        }
    }
}

impl From<usize> for SizeSpec {
    fn from(n: usize) -> Self {
        SizeSpec::Bytes(n)
    }
}

pub fn parse_size(raw: &str) -> Result<usize, InvalidSize> {
    let invalid = || InvalidSize(raw.to_owned());
    let s = raw.trim();

    let (digits, scale) = match s.chars().last() {
        Some('k') | Some('K') => (&s[..s.len() - 1], 1024),
        Some('m') | Some('M') => (&s[..s.len() - 1], 1024 * 1024),
        _ => (s, 1),
    };

    let n: usize = digits.parse().map_err(|_| invalid())?;
    n.checked_mul(scale).ok_or_else(invalid)
}

/// A buffer size multiplier written as a plain number or as an `x` token
/// (`8`, `"x8"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MultiplierSpec {
    Factor(usize),
    Token(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid multiplier '{0}'")]
pub struct InvalidMultiplier(pub String);

impl MultiplierSpec {
    pub fn factor(&self) -> Result<usize, InvalidMultiplier> {
        match self {
            MultiplierSpec::Factor(n) => Ok(*n),
            MultiplierSpec::Token(s) => parse_multiplier(s),
        }
    }
}

impl From<usize> for MultiplierSpec {
    fn from(n: usize) -> Self {
        MultiplierSpec::Factor(n)
    }
}

pub fn parse_multiplier(raw: &str) -> Result<usize, InvalidMultiplier> {
    let s = raw.trim();
    let digits = s
        .strip_prefix('x')
        .or_else(|| s.strip_prefix('X'))
        .unwrap_or(s);

    digits
        .parse()
        .map_err(|_| InvalidMultiplier(raw.to_owned()))
}
