//! The per-request response model.
//!
//! A [`Response`] is created at the start of the middleware pipeline, mutated by any number of
//! middleware, and finalized exactly once into a [`ServerPayload`] for the transport.
//!
//! # Lifecycle
//!
//! The model has two states. While *writable*, every mutator succeeds; finalizing moves it to
//! the *finalized* state for good, after which every mutator fails with
//! [`ResponseError::NotWritable`]. Reads are valid in both states.
//!
//! # Status
//!
//! Until a middleware sets a status explicitly, [`Response::status`] is derived from the body:
//! `200 OK` when a body is present, `404 Not Found` otherwise. The derived value is never
//! cached, so it always previews what would be sent right now.

use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use weft_http::protocol::{PayloadBody, ServerPayload};

use crate::ResponseError;
use crate::body::Body;
use crate::mime_lookup::{DefaultMimeLookup, MimeLookup};
use crate::utils::ensure;

pub struct Response {
    body: Body,
    headers: HeaderMap,
    status: Option<StatusCode>,
    kind: Option<String>,
    writable: bool,
    finalized: Option<ServerPayload>,
    mime_lookup: Arc<dyn MimeLookup>,
}

impl Response {
    /// Creates an empty, writable response using [`DefaultMimeLookup`].
    pub fn new() -> Self {
        Self::with_mime_lookup(Arc::new(DefaultMimeLookup))
    }

    pub fn with_mime_lookup(mime_lookup: Arc<dyn MimeLookup>) -> Self {
        Self {
            body: Body::Empty,
            headers: HeaderMap::new(),
            status: None,
            kind: None,
            writable: true,
            finalized: None,
            mime_lookup,
        }
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    /// The body as set by middleware.
    ///
    /// Finalizing moves the body into the payload, so this reads [`Body::Empty`] afterwards. The
    /// sent body is available from [`Response::to_server_payload`].
    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<Body>) -> Result<(), ResponseError> {
        ensure!(self.writable, ResponseError::NotWritable);
        self.body = body.into();
        Ok(())
    }

    /// The headers, or the frozen payload's headers once finalized.
    pub fn headers(&self) -> &HeaderMap {
        self.finalized.as_ref().map_or(&self.headers, ServerPayload::headers)
    }

    pub fn headers_mut(&mut self) -> Result<&mut HeaderMap, ResponseError> {
        ensure!(self.writable, ResponseError::NotWritable);
        Ok(&mut self.headers)
    }

    /// Replaces the whole header collection.
    pub fn set_headers(&mut self, headers: HeaderMap) -> Result<(), ResponseError> {
        ensure!(self.writable, ResponseError::NotWritable);
        self.headers = headers;
        Ok(())
    }

    /// Sets a header, replacing any existing values with the same name.
    pub fn insert_header<K, V>(&mut self, name: K, value: V) -> Result<(), ResponseError>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        ensure!(self.writable, ResponseError::NotWritable);
        let (name, value) = header_pair(name, value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Adds a header value, keeping existing values with the same name.
    pub fn append_header<K, V>(&mut self, name: K, value: V) -> Result<(), ResponseError>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        ensure!(self.writable, ResponseError::NotWritable);
        let (name, value) = header_pair(name, value)?;
        self.headers.append(name, value);
        Ok(())
    }

    /// The status that would be sent right now.
    ///
    /// Explicit status if one was set, otherwise derived from the body. Once finalized this is
    /// the payload's status.
    pub fn status(&self) -> StatusCode {
        if let Some(payload) = &self.finalized {
            return payload.status();
        }
        self.status.unwrap_or_else(|| derive_status(self.body.is_present()))
    }

    /// The status set by a middleware, if any.
    pub fn explicit_status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) -> Result<(), ResponseError> {
        ensure!(self.writable, ResponseError::NotWritable);
        self.status = Some(status);
        Ok(())
    }

    /// The media type hint used to produce `Content-Type`.
    pub fn type_(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Stores a media type hint such as `"html"`, `"json"`, `".png"` or a full MIME type.
    ///
    /// The hint is only resolved into a `Content-Type` header when the response is finalized.
    pub fn set_type(&mut self, kind: impl Into<String>) -> Result<(), ResponseError> {
        ensure!(self.writable, ResponseError::NotWritable);
        self.kind = Some(kind.into());
        Ok(())
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }

    /// Finalizes the response and returns the payload for the transport.
    ///
    /// The first call resolves the body, synthesizes `Content-Type` (and `Content-Length: 0`
    /// for empty responses), freezes the model and stores the payload. Later calls return the
    /// same stored payload.
    ///
    /// # Errors
    ///
    /// [`ResponseError::UnconvertibleBody`] when the body cannot be converted. Nothing is
    /// committed in that case: the model stays writable with its body in place.
    pub fn to_server_payload(&mut self) -> Result<&ServerPayload, ResponseError> {
        let payload = match self.finalized.take() {
            Some(payload) => payload,
            None => self.materialize()?,
        };
        Ok(self.finalized.insert(payload))
    }

    /// Finalizes the response (if needed) and hands it over as an `http::Response`.
    ///
    /// # Errors
    ///
    /// See [`Response::to_server_payload`].
    pub fn into_http(mut self) -> Result<http::Response<PayloadBody>, ResponseError> {
        let payload = match self.finalized.take() {
            Some(payload) => payload,
            None => self.materialize()?,
        };
        Ok(payload.into())
    }

    /// Adopts a prebuilt response as the finalized payload.
    ///
    /// The model's own body, headers, status and type are ignored from then on.
    pub fn with(&mut self, response: http::Response<PayloadBody>) -> Result<(), ResponseError> {
        ensure!(self.writable, ResponseError::NotWritable);
        self.writable = false;
        self.body = Body::Empty;
        self.finalized = Some(ServerPayload::from(response));
        Ok(())
    }

    /// Releases the body and makes the response read-only.
    ///
    /// A stream body is dropped without being read. Finalizing afterwards yields a payload
    /// without a body.
    pub fn destroy(&mut self) {
        self.body = Body::Empty;
        self.writable = false;
    }

    fn materialize(&mut self) -> Result<ServerPayload, ResponseError> {
        let resolved = self.body.resolve()?;
        if self.kind.is_none() {
            self.kind = resolved.inferred_type.map(str::to_owned);
        }

        if let Some(kind) = self.kind.as_deref() {
            match self.mime_lookup.lookup(kind).and_then(|mime| HeaderValue::try_from(mime).ok()) {
                Some(content_type) => {
                    if !self.headers.contains_key(CONTENT_TYPE) {
                        self.headers.append(CONTENT_TYPE, content_type);
                    }
                }
                None => warn!(kind, "unknown response type, Content-Type is not set"),
            }
        }

        if resolved.body.is_none()
            && !self.headers.contains_key(CONTENT_TYPE)
            && !self.headers.contains_key(CONTENT_LENGTH)
        {
            self.headers.append(CONTENT_LENGTH, HeaderValue::from_static("0"));
        }

        self.writable = false;

        let status = self.status.unwrap_or_else(|| derive_status(resolved.body.is_some()));
        debug!(%status, kind = ?self.kind, "response finalized");

        Ok(ServerPayload::new(status, std::mem::take(&mut self.headers), resolved.body))
    }
}

fn derive_status(has_body: bool) -> StatusCode {
    if has_body { StatusCode::OK } else { StatusCode::NOT_FOUND }
}

fn header_pair<K, V>(name: K, value: V) -> Result<(HeaderName, HeaderValue), ResponseError>
where
    HeaderName: TryFrom<K>,
    <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
    HeaderValue: TryFrom<V>,
    <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
{
    let name = HeaderName::try_from(name).map_err(|e| ResponseError::from(Into::<http::Error>::into(e)))?;
    let value = HeaderValue::try_from(value).map_err(|e| ResponseError::from(Into::<http::Error>::into(e)))?;
    Ok((name, value))
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("body", &self.body)
            .field("headers", &self.headers)
            .field("status", &self.status)
            .field("type", &self.kind)
            .field("writable", &self.writable)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

/// Builds a [`Response`] with a custom MIME lookup or initial state.
///
/// Header errors are kept until [`ResponseBuilder::build`], in the manner of
/// `http::response::Builder`.
pub struct ResponseBuilder {
    mime_lookup: Arc<dyn MimeLookup>,
    body: Body,
    headers: HeaderMap,
    status: Option<StatusCode>,
    kind: Option<String>,
    error: Option<ResponseError>,
}

impl ResponseBuilder {
    fn new() -> Self {
        Self {
            mime_lookup: Arc::new(DefaultMimeLookup),
            body: Body::Empty,
            headers: HeaderMap::new(),
            status: None,
            kind: None,
            error: None,
        }
    }

    pub fn mime_lookup<L: MimeLookup + 'static>(mut self, mime_lookup: L) -> Self {
        self.mime_lookup = Arc::new(mime_lookup);
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        match header_pair(name, value) {
            Ok((name, value)) => {
                self.headers.append(name, value);
            }
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
            }
        }
        self
    }

    pub fn type_(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// # Errors
    ///
    /// The first invalid header passed to [`ResponseBuilder::header`].
    pub fn build(self) -> Result<Response, ResponseError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let mut response = Response::with_mime_lookup(self.mime_lookup);
        response.body = self.body;
        response.headers = self.headers;
        response.status = self.status;
        response.kind = self.kind;
        Ok(response)
    }
}

impl fmt::Debug for ResponseBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBuilder")
            .field("body", &self.body)
            .field("headers", &self.headers)
            .field("status", &self.status)
            .field("type", &self.kind)
            .finish_non_exhaustive()
    }
}
