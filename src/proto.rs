//! Signalling boundary types
//!
//! Minimal request/response surface shared with the external signalling
//! machinery. The wire format (framing, header syntax) is owned by the
//! control-channel client, not this crate; these types only carry what the
//! session core needs: a method, a target URI, a correlation token and an
//! opaque body.

use bytes::Bytes;

/// Correlation token attached to every request, echoed by its response
pub type CSeq = u32;

/// Signalling request methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Capability query
    Options,
    /// Stream list query
    List,
    /// Target-establishing request (resolves a URI to a streaming peer)
    Describe,
    /// Media setup (handled by the external session machinery)
    Setup,
    /// Media start (handled by the external session machinery)
    Play,
    /// Session teardown
    Teardown,
    /// Parameter read (e.g. ICE server query)
    GetParameter,
    /// Parameter write (e.g. authorization token)
    SetParameter,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Options => "OPTIONS",
            Method::List => "LIST",
            Method::Describe => "DESCRIBE",
            Method::Setup => "SETUP",
            Method::Play => "PLAY",
            Method::Teardown => "TEARDOWN",
            Method::GetParameter => "GET_PARAMETER",
            Method::SetParameter => "SET_PARAMETER",
        };
        f.write_str(name)
    }
}

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    BadRequest,
    Unauthorized,
    NotFound,
    MethodNotAllowed,
}

impl StatusCode {
    /// Numeric code
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Reason phrase
    pub fn reason(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// Signalling request
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub uri: String,
    pub cseq: CSeq,
    pub body: Bytes,
}

impl Request {
    /// Create a request with an empty body
    pub fn new(method: Method, uri: impl Into<String>, cseq: CSeq) -> Self {
        Self {
            method,
            uri: uri.into(),
            cseq,
            body: Bytes::new(),
        }
    }

    /// Attach a body
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

/// Signalling response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub cseq: CSeq,
    pub body: Bytes,
}

impl Response {
    /// Create a response with an empty body
    pub fn new(status: StatusCode, cseq: CSeq) -> Self {
        Self {
            status,
            cseq,
            body: Bytes::new(),
        }
    }

    /// Successful response carrying a body
    pub fn ok(cseq: CSeq, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::Ok,
            cseq,
            body: body.into(),
        }
    }

    /// Error response for a request
    pub fn error(status: StatusCode, cseq: CSeq) -> Self {
        Self::new(status, cseq)
    }
}
