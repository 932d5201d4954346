//! The body a middleware assigns to a response.
//!
//! Middleware may overwrite the body any number of times, so its shape is only interpreted
//! when the response is finalized. [`Body`] is the tagged union of every shape the model
//! knows how to send; [`Body::resolve`] applies the conversion rules in a fixed order:
//!
//! 1. primitives are rendered as text, typed `html` or `text/plain`
//! 2. bytes and streams pass through untouched
//! 3. structured values are serialized to JSON, typed `json`
//! 4. a structured value that cannot be serialized is an error
//! 5. an empty body resolves to nothing

use bytes::Bytes;
use futures::Stream;
use serde::Serialize;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::mem;
use tracing::trace;
use weft_http::protocol::PayloadBody;

use crate::ResponseError;
use crate::html::is_html;

/// A scalar value sent as its textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    BigInt(i128),
    Bool(bool),
    /// A named symbol, rendered as its name.
    Atom(Cow<'static, str>),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Str(s) => f.write_str(s),
            Primitive::Int(i) => write!(f, "{i}"),
            Primitive::UInt(u) => write!(f, "{u}"),
            Primitive::Float(x) => write!(f, "{x}"),
            Primitive::BigInt(i) => write!(f, "{i}"),
            Primitive::Bool(b) => write!(f, "{b}"),
            Primitive::Atom(name) => f.write_str(name),
        }
    }
}

/// A value serialized to JSON when the response is finalized.
///
/// Implemented for every `Serialize + Send` type, so serialization errors (a map with
/// non-string keys, a failing `Serialize` impl) surface at finalize time.
pub trait Structured: Send {
    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error>;
}

impl<T: Serialize + Send> Structured for T {
    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[derive(Default)]
pub enum Body {
    #[default]
    Empty,
    Primitive(Primitive),
    Bytes(Bytes),
    /// A readable body, handed to the transport without buffering.
    Stream(PayloadBody),
    Structured(Box<dyn Structured>),
    /// URL search params, sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl Body {
    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn json<T: Serialize + Send + 'static>(value: T) -> Self {
        Self::Structured(Box::new(value))
    }

    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<Box<dyn Error + Send + Sync>> + 'static,
    {
        Self::Stream(PayloadBody::from_stream(stream))
    }

    pub fn atom(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Primitive(Primitive::Atom(name.into()))
    }

    /// Whether the body will reach the transport.
    ///
    /// A structured value is serialized to tell, since one that serializes to `null` is sent
    /// as no body at all. A value that fails to serialize counts as present.
    pub fn is_present(&self) -> bool {
        match self {
            Body::Empty => false,
            Body::Structured(value) => !matches!(value.to_json(), Ok(serde_json::Value::Null)),
            _ => true,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Body::Empty => "empty",
            Body::Primitive(_) => "primitive",
            Body::Bytes(_) => "bytes",
            Body::Stream(_) => "stream",
            Body::Structured(_) => "structured",
            Body::Form(_) => "form",
        }
    }

    /// Converts the body into its transport form, leaving [`Body::Empty`] behind.
    ///
    /// On error the body is left untouched, so the caller may replace it and retry.
    pub(crate) fn resolve(&mut self) -> Result<Resolved, ResponseError> {
        trace!(kind = self.kind_name(), "resolving response body");
        let resolved = match self {
            Body::Empty => Resolved::absent(),
            Body::Primitive(primitive) => Resolved::text(primitive.to_string()),
            Body::Bytes(bytes) => Resolved::passthrough(PayloadBody::once(mem::take(bytes))),
            Body::Stream(stream) => Resolved::passthrough(mem::replace(stream, PayloadBody::empty())),
            Body::Structured(value) => Resolved::json(value.to_json().map_err(ResponseError::unconvertible_body)?)?,
            Body::Form(pairs) => {
                let encoded = serde_urlencoded::to_string(&*pairs).map_err(ResponseError::unconvertible_body)?;
                Resolved::typed(Bytes::from(encoded), "form")
            }
        };
        *self = Body::Empty;
        Ok(resolved)
    }
}

/// A body ready for the transport plus the media type hint inferred from its shape.
#[derive(Debug)]
pub(crate) struct Resolved {
    pub(crate) body: Option<PayloadBody>,
    pub(crate) inferred_type: Option<&'static str>,
}

impl Resolved {
    fn absent() -> Self {
        Self { body: None, inferred_type: None }
    }

    fn passthrough(body: PayloadBody) -> Self {
        Self { body: Some(body), inferred_type: None }
    }

    fn typed(bytes: Bytes, inferred_type: &'static str) -> Self {
        Self { body: Some(PayloadBody::once(bytes)), inferred_type: Some(inferred_type) }
    }

    fn text(text: String) -> Self {
        let inferred_type = if is_html(&text) { "html" } else { "text/plain" };
        Self::typed(Bytes::from(text), inferred_type)
    }

    // scalars are primitives even when they arrive as structured values
    fn json(value: serde_json::Value) -> Result<Self, ResponseError> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::absent()),
            Value::Bool(b) => Ok(Self::text(b.to_string())),
            Value::Number(n) => Ok(Self::text(n.to_string())),
            Value::String(s) => Ok(Self::text(s)),
            value @ (Value::Array(_) | Value::Object(_)) => {
                let bytes = serde_json::to_vec(&value).map_err(ResponseError::unconvertible_body)?;
                Ok(Self::typed(Bytes::from(bytes), "json"))
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Body::Empty"),
            Body::Primitive(primitive) => f.debug_tuple("Body::Primitive").field(primitive).finish(),
            Body::Bytes(bytes) => f.debug_tuple("Body::Bytes").field(&bytes.len()).finish(),
            Body::Stream(stream) => f.debug_tuple("Body::Stream").field(stream).finish(),
            Body::Structured(_) => f.write_str("Body::Structured"),
            Body::Form(pairs) => f.debug_tuple("Body::Form").field(pairs).finish(),
        }
    }
}

macro_rules! primitive_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Body {
                fn from(value: $ty) -> Self {
                    Body::Primitive(Primitive::$variant(value.into()))
                }
            }
        )+
    };
}

primitive_from!(Str: String, &str);
primitive_from!(Int: i8, i16, i32, i64);
primitive_from!(UInt: u8, u16, u32, u64);
primitive_from!(Float: f32, f64);
primitive_from!(BigInt: i128);
primitive_from!(Bool: bool);

impl From<Primitive> for Body {
    fn from(primitive: Primitive) -> Self {
        Body::Primitive(primitive)
    }
}

impl From<()> for Body {
    fn from((): ()) -> Self {
        Body::Empty
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for Body {
    fn from(bytes: &'static [u8]) -> Self {
        Body::Bytes(Bytes::from_static(bytes))
    }
}

impl From<PayloadBody> for Body {
    fn from(body: PayloadBody) -> Self {
        Body::Stream(body)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        if value.is_null() { Body::Empty } else { Body::Structured(Box::new(value)) }
    }
}

impl<T: Into<Body>> From<Option<T>> for Body {
    fn from(option: Option<T>) -> Self {
        option.map_or(Body::Empty, Into::into)
    }
}
