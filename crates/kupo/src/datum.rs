//! Plutus datum decoding.
//!
//! Datums arrive from Kupo as hex-encoded CBOR. Constructor tags wrap
//! positional fields; a CER feed datum looks like
//!
//! ```text
//! 121([ 121([ h'4345522F4144412D555344', 1723186803981, 121([697, 2000]) ]), ... ])
//! ```
//!
//! The first field of the outer constructor carries the feed name, the
//! publication time in milliseconds and the price as `[amount, denominator]`.

use ciborium::value::Value;
use pubwatch_core::OnChainRecord;
use thiserror::Error;

/// Nesting limit for constructor and list descent.
pub const MAX_DATUM_DEPTH: usize = 64;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("CBOR decoding failed: {0}")]
    Cbor(String),

    #[error("datum exceeds maximum depth of {MAX_DATUM_DEPTH}")]
    TooDeep,

    #[error("unsupported CBOR item: {0}")]
    Unsupported(&'static str),

    #[error("unexpected datum shape: {0}")]
    Shape(String),
}

/// Datum tree with constructor tags removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatumValue {
    Int(i128),
    Bytes(Vec<u8>),
    Text(String),
    List(Vec<DatumValue>),
    Map(Vec<(DatumValue, DatumValue)>),
}

impl DatumValue {
    /// Converts a CBOR item, unwrapping tags and surfacing UTF-8 byte strings as text.
    ///
    /// # Errors
    /// Fails past [`MAX_DATUM_DEPTH`] or on items a datum cannot hold.
    pub fn from_cbor(value: Value) -> Result<Self, DecodeError> {
        Self::convert(value, 0)
    }

    fn convert(value: Value, depth: usize) -> Result<Self, DecodeError> {
        if depth > MAX_DATUM_DEPTH {
            return Err(DecodeError::TooDeep);
        }
        match value {
            Value::Integer(i) => Ok(Self::Int(i128::from(i))),
            Value::Bytes(bytes) => Ok(match String::from_utf8(bytes) {
                Ok(text) => Self::Text(text),
                Err(e) => Self::Bytes(e.into_bytes()),
            }),
            Value::Text(text) => Ok(Self::Text(text)),
            Value::Tag(_, inner) => Self::convert(*inner, depth + 1),
            Value::Array(items) => items
                .into_iter()
                .map(|item| Self::convert(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((Self::convert(k, depth + 1)?, Self::convert(v, depth + 1)?)))
                .collect::<Result<Vec<_>, DecodeError>>()
                .map(Self::Map),
            Value::Float(_) => Err(DecodeError::Unsupported("float")),
            Value::Bool(_) => Err(DecodeError::Unsupported("bool")),
            Value::Null => Err(DecodeError::Unsupported("null")),
            _ => Err(DecodeError::Unsupported("unknown item")),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

/// Result of decoding a feed datum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedDatum {
    Record(OnChainRecord),
    /// Constructor wrapping a map rather than positional fields.
    Raw(DatumValue),
}

impl FeedDatum {
    /// Returns the record, treating a raw datum as a decode failure.
    ///
    /// # Errors
    /// Returns [`DecodeError::Shape`] for [`FeedDatum::Raw`].
    pub fn into_record(self) -> Result<OnChainRecord, DecodeError> {
        match self {
            Self::Record(record) => Ok(record),
            Self::Raw(value) => Err(DecodeError::Shape(format!(
                "expected feed record, found {}",
                value.kind()
            ))),
        }
    }
}

fn parse_cbor(datum_hex: &str) -> Result<Value, DecodeError> {
    let bytes = hex::decode(datum_hex.trim())?;
    ciborium::from_reader(bytes.as_slice()).map_err(|e| DecodeError::Cbor(e.to_string()))
}

/// Decodes a hex CBOR feed datum.
///
/// # Errors
/// Returns an error for invalid hex, invalid CBOR or a datum without the
/// expected `[name, timestamp, [amount, denominator]]` first field.
pub fn decode_feed_datum(datum_hex: &str) -> Result<FeedDatum, DecodeError> {
    let fields = match DatumValue::from_cbor(parse_cbor(datum_hex)?)? {
        map @ DatumValue::Map(_) => return Ok(FeedDatum::Raw(map)),
        DatumValue::List(fields) => fields,
        other => {
            return Err(DecodeError::Shape(format!(
                "expected constructor fields, found {}",
                other.kind()
            )))
        }
    };

    let first = fields
        .into_iter()
        .next()
        .ok_or_else(|| DecodeError::Shape("datum has no fields".to_string()))?;
    let record = match first {
        DatumValue::List(record) => record,
        other => {
            return Err(DecodeError::Shape(format!(
                "expected feed record list, found {}",
                other.kind()
            )))
        }
    };

    let [name, timestamp, price]: [DatumValue; 3] = record.try_into().map_err(|v: Vec<_>| {
        DecodeError::Shape(format!("feed record has {} fields, expected 3", v.len()))
    })?;

    let feed_id = match name {
        DatumValue::Text(text) => text,
        DatumValue::Bytes(bytes) => hex::encode(bytes),
        other => {
            return Err(DecodeError::Shape(format!(
                "feed name is {}",
                other.kind()
            )))
        }
    };
    let timestamp_ms = match timestamp {
        DatumValue::Int(ms) => i64::try_from(ms)
            .map_err(|_| DecodeError::Shape(format!("timestamp {ms} out of range")))?,
        other => return Err(DecodeError::Shape(format!("timestamp is {}", other.kind()))),
    };
    let (amount, denominator) = match price {
        DatumValue::List(parts) => match parts.as_slice() {
            [DatumValue::Int(amount), DatumValue::Int(denominator)] => (*amount, *denominator),
            _ => return Err(DecodeError::Shape("price is not [amount, denominator]".to_string())),
        },
        other => return Err(DecodeError::Shape(format!("price is {}", other.kind()))),
    };

    Ok(FeedDatum::Record(OnChainRecord::new(
        feed_id,
        timestamp_ms,
        amount,
        denominator,
    )))
}

/// Decodes the Fact Statement Pointer datum: a CBOR byte string holding the policy id.
///
/// # Errors
/// Returns an error if the datum is not a single byte string.
pub fn decode_policy_id(datum_hex: &str) -> Result<String, DecodeError> {
    match parse_cbor(datum_hex)? {
        Value::Bytes(bytes) => Ok(hex::encode(bytes)),
        _ => Err(DecodeError::Shape("pointer datum is not a byte string".to_string())),
    }
}

/// Hex-encodes a CBOR item. Test and tooling helper.
///
/// # Errors
/// Returns [`DecodeError::Cbor`] if serialization fails.
pub fn encode_hex(value: &Value) -> Result<String, DecodeError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| DecodeError::Cbor(e.to_string()))?;
    Ok(hex::encode(buf))
}

/// Builds a CER feed datum in the on-chain layout.
///
/// # Errors
/// Returns [`DecodeError::Cbor`] if a number does not fit a CBOR integer.
pub fn feed_datum(
    feed_id: &str,
    timestamp_ms: i64,
    amount: i128,
    denominator: i128,
) -> Result<Value, DecodeError> {
    let constr = |fields: Vec<Value>| Value::Tag(121, Box::new(Value::Array(fields)));
    let int = |n: i128| {
        ciborium::value::Integer::try_from(n)
            .map(Value::Integer)
            .map_err(|_| DecodeError::Cbor(format!("{n} does not fit a CBOR integer")))
    };
    Ok(constr(vec![
        constr(vec![
            Value::Bytes(feed_id.as_bytes().to_vec()),
            Value::Integer(timestamp_ms.into()),
            constr(vec![int(amount)?, int(denominator)?]),
        ]),
        Value::Bytes(vec![0xde, 0xad]),
    ]))
}
