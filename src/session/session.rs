//! Signalling session
//!
//! One [`Session`] exists per logical signalling conversation on the control
//! channel. The external session machinery parses the wire protocol and
//! invokes the handlers here; this module only implements routing semantics:
//! answering informational queries, resolving the addressed target to a
//! streaming peer, and correlating the responses to requests the session
//! itself issued outward.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::peer::{PeerFactory, StreamingPeer};
use crate::proto::{CSeq, Method, Request, Response, StatusCode};
use crate::resolver::NameResolver;
use crate::session::cache::SessionCache;
use crate::session::state::SessionPhase;

/// Capability answer for OPTIONS queries; static, independent of the request
const CAPABILITIES: &str =
    "OPTIONS, LIST, DESCRIBE, SETUP, PLAY, TEARDOWN, GET_PARAMETER, SET_PARAMETER";

/// One signalling session bound to the agent's shared state
pub struct Session {
    config: Arc<AgentConfig>,
    resolver: NameResolver,
    cache: Arc<SessionCache>,
    factory: PeerFactory,

    request_tx: mpsc::Sender<Request>,
    response_tx: mpsc::Sender<Response>,

    phase: SessionPhase,
    peer: Option<Box<dyn StreamingPeer>>,

    next_cseq: CSeq,
    auth_cseq: Option<CSeq>,
    ice_server_cseq: Option<CSeq>,
}

impl Session {
    pub(crate) fn new(
        config: Arc<AgentConfig>,
        resolver: NameResolver,
        cache: Arc<SessionCache>,
        factory: PeerFactory,
        request_tx: mpsc::Sender<Request>,
        response_tx: mpsc::Sender<Response>,
    ) -> Self {
        Self {
            config,
            resolver,
            cache,
            factory,
            request_tx,
            response_tx,
            phase: SessionPhase::Unbound,
            peer: None,
            next_cseq: 0,
            auth_cseq: None,
            ice_server_cseq: None,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The peer this session owns, once a target resolved
    pub fn peer(&self) -> Option<&dyn StreamingPeer> {
        self.peer.as_deref()
    }

    fn allocate_cseq(&mut self) -> CSeq {
        self.next_cseq += 1;
        self.next_cseq
    }

    async fn send_request(&self, request: Request) -> Result<()> {
        self.request_tx
            .send(request)
            .await
            .map_err(|_| AgentError::SinkClosed)
    }

    async fn send_response(&self, response: Response) -> Result<()> {
        self.response_tx
            .send(response)
            .await
            .map_err(|_| AgentError::SinkClosed)
    }

    /// Control channel reported the session connected
    ///
    /// Issues the outward authorization request (when a token is configured)
    /// and the ICE-server query, each under a fresh correlation token.
    pub async fn on_connected(&mut self) -> Result<()> {
        self.phase.connect();

        if !self.config.identity.auth_token.is_empty() {
            self.request_authorization().await?;
        }
        self.request_ice_servers().await?;

        Ok(())
    }

    /// Issue an outward authorization request
    ///
    /// The previously pending authorization token, if any, becomes stale:
    /// only a response matching the token returned here will be accepted.
    pub async fn request_authorization(&mut self) -> Result<CSeq> {
        let cseq = self.allocate_cseq();
        self.auth_cseq = Some(cseq);

        let request = Request::new(Method::SetParameter, self.config.identity.name.as_str(), cseq)
            .with_body(self.config.identity.auth_token.clone());
        tracing::debug!(cseq = cseq, "Sending authorization request");
        self.send_request(request).await?;

        Ok(cseq)
    }

    /// Issue an outward ICE-server query
    pub async fn request_ice_servers(&mut self) -> Result<CSeq> {
        let cseq = self.allocate_cseq();
        self.ice_server_cseq = Some(cseq);

        let request = Request::new(Method::GetParameter, self.config.identity.name.as_str(), cseq)
            .with_body("ice-servers");
        tracing::debug!(cseq = cseq, "Sending ICE server query");
        self.send_request(request).await?;

        Ok(cseq)
    }

    /// Answer an OPTIONS query from static capability data
    pub async fn on_options_request(&mut self, request: &Request) -> Result<()> {
        self.send_response(Response::ok(request.cseq, CAPABILITIES))
            .await
    }

    /// Answer a LIST query from the shared cache
    ///
    /// On a cache miss the registry's names are serialized and stored before
    /// answering; the registry never changes, so the stored blob stays valid
    /// for the process lifetime.
    pub async fn on_list_request(&mut self, request: &Request) -> Result<()> {
        let blob = match self.cache.list().await {
            Some(blob) => blob,
            None => {
                let blob = serialize_list(&self.resolver);
                self.cache.store_list(blob.clone()).await;
                blob
            }
        };

        self.send_response(Response::ok(request.cseq, blob)).await
    }

    /// Answer an inbound GET_PARAMETER query from the shared cache
    pub async fn on_get_parameter_request(&mut self, request: &Request) -> Result<()> {
        let blob = match self.cache.parameters().await {
            Some(blob) => blob,
            None => {
                let blob = serialize_parameters(&self.config);
                self.cache.store_parameters(blob.clone()).await;
                blob
            }
        };

        self.send_response(Response::ok(request.cseq, blob)).await
    }

    /// Resolve a URI to a freshly constructed peer
    ///
    /// A session resolves at most once; a second attempt while a peer exists
    /// is a protocol violation. Factory refusal is indistinguishable from a
    /// failed resolution for the caller.
    fn resolve_target(&self, uri: &str) -> Result<Box<dyn StreamingPeer>> {
        if self.peer.is_some() {
            return Err(AgentError::PeerAlreadyBound);
        }

        let Some(source) = self.resolver.resolve(uri) else {
            return Err(AgentError::UnknownTarget(uri.to_string()));
        };

        self.factory
            .create_peer(source)
            .ok_or_else(|| AgentError::UnknownTarget(uri.to_string()))
    }

    /// Resolve the addressed target and bind a streaming peer
    ///
    /// Fails the request with 404 when the URI does not resolve or the
    /// backend refuses construction, and with 405 when the session already
    /// owns a peer. The session stays usable after either failure.
    pub async fn on_describe_request(&mut self, request: &Request) -> Result<()> {
        match self.resolve_target(&request.uri) {
            Ok(peer) => {
                tracing::info!(
                    uri = %request.uri,
                    kind = %peer.kind(),
                    "Target resolved, peer bound"
                );
                self.peer = Some(peer);
                self.phase.target_resolved();

                self.send_response(Response::new(StatusCode::Ok, request.cseq))
                    .await
            }
            Err(AgentError::PeerAlreadyBound) => {
                tracing::warn!(uri = %request.uri, "DESCRIBE on a session that already owns a peer");
                self.send_response(Response::error(StatusCode::MethodNotAllowed, request.cseq))
                    .await
            }
            Err(_) => {
                tracing::error!(uri = %request.uri, "Unknown URI");
                self.send_response(Response::error(StatusCode::NotFound, request.cseq))
                    .await
            }
        }
    }

    /// Handle the response to a previously issued ICE-server query
    ///
    /// Returns whether the response matched the pending token. Stale or
    /// unknown tokens are discarded without touching session state.
    pub fn on_get_parameter_response(&mut self, response: &Response) -> bool {
        match self.ice_server_cseq {
            Some(cseq) if cseq == response.cseq => {
                self.ice_server_cseq = None;
                tracing::debug!(cseq = response.cseq, "ICE server response accepted");
                true
            }
            _ => {
                tracing::debug!(cseq = response.cseq, "Stale GET_PARAMETER response discarded");
                false
            }
        }
    }

    /// Handle the response to a previously issued authorization request
    ///
    /// Returns whether the response matched the pending token. Stale or
    /// unknown tokens are discarded without touching session state.
    pub fn on_set_parameter_response(&mut self, response: &Response) -> bool {
        match self.auth_cseq {
            Some(cseq) if cseq == response.cseq => {
                self.auth_cseq = None;
                if response.status != StatusCode::Ok {
                    tracing::warn!(status = %response.status, "Authorization rejected");
                }
                true
            }
            _ => {
                tracing::debug!(cseq = response.cseq, "Stale SET_PARAMETER response discarded");
                false
            }
        }
    }

    /// External teardown of the session; releases the owned peer
    pub fn on_teardown(&mut self) {
        if let Some(peer) = self.peer.take() {
            tracing::debug!(kind = %peer.kind(), "Releasing streaming peer");
        }
        self.phase.close();
    }
}

/// Serialize the registry's entries into the LIST answer blob
///
/// Deterministic: names sorted, one `name[: description]` line per entry,
/// CRLF terminated. The default source renders with its empty name.
fn serialize_list(resolver: &NameResolver) -> Bytes {
    let registry = resolver.registry();
    let mut out = String::new();

    for name in registry.names() {
        out.push_str(name);
        if let Some(source) = registry.get(name) {
            if !source.description.is_empty() {
                out.push_str(": ");
                out.push_str(&source.description);
            }
        }
        out.push_str("\r\n");
    }

    Bytes::from(out)
}

/// Serialize the agent identity into the parameters answer blob
fn serialize_parameters(config: &AgentConfig) -> Bytes {
    let mut out = String::new();
    out.push_str("name: ");
    out.push_str(&config.identity.name);
    out.push_str("\r\n");
    if !config.identity.description.is_empty() {
        out.push_str("description: ");
        out.push_str(&config.identity.description);
        out.push_str("\r\n");
    }
    Bytes::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentIdentity;
    use crate::registry::{SourceDefinition, SourceKind, SourceRegistry};
    use crate::session::SessionBinder;

    fn binder_with(registry: SourceRegistry, config: AgentConfig) -> SessionBinder {
        SessionBinder::new(
            Arc::new(config),
            Arc::new(registry),
            Arc::new(SessionCache::new()),
            PeerFactory::new(),
        )
    }

    fn test_binder() -> SessionBinder {
        let registry = SourceRegistry::builder()
            .default_source(
                SourceDefinition::new(SourceKind::Test, "videotestsrc").description("Test pattern"),
            )
            .source(
                "cam1",
                SourceDefinition::new(SourceKind::Relay, "rtsp://b/").description("Camera 1"),
            )
            .build();
        binder_with(registry, AgentConfig::new("agent"))
    }

    struct Harness {
        session: Session,
        requests: mpsc::Receiver<Request>,
        responses: mpsc::Receiver<Response>,
    }

    fn harness(binder: &SessionBinder) -> Harness {
        let (request_tx, requests) = mpsc::channel(16);
        let (response_tx, responses) = mpsc::channel(16);
        Harness {
            session: binder.bind(request_tx, response_tx),
            requests,
            responses,
        }
    }

    #[tokio::test]
    async fn test_options_answered_statically() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        let req = Request::new(Method::Options, "agent", 10);
        h.session.on_options_request(&req).await.unwrap();

        let resp = h.responses.recv().await.unwrap();
        assert_eq!(resp.status, StatusCode::Ok);
        assert_eq!(resp.cseq, 10);
        assert_eq!(&resp.body[..], CAPABILITIES.as_bytes());
    }

    #[tokio::test]
    async fn test_list_cached_and_idempotent() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        let req = Request::new(Method::List, "agent", 1);
        h.session.on_list_request(&req).await.unwrap();
        let first = h.responses.recv().await.unwrap();

        h.session.on_list_request(&req).await.unwrap();
        let second = h.responses.recv().await.unwrap();

        assert_eq!(first.body, second.body);
        assert_eq!(
            &first.body[..],
            b": Test pattern\r\ncam1: Camera 1\r\n"
        );
    }

    #[tokio::test]
    async fn test_list_shared_across_sessions() {
        let binder = test_binder();
        let mut first = harness(&binder);
        let mut second = harness(&binder);

        let req = Request::new(Method::List, "agent", 1);
        first.session.on_list_request(&req).await.unwrap();
        let blob = first.responses.recv().await.unwrap().body;

        // Second session answers from the blob the first one stored
        second.session.on_list_request(&req).await.unwrap();
        assert_eq!(second.responses.recv().await.unwrap().body, blob);
    }

    #[tokio::test]
    async fn test_describe_binds_peer() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        let req = Request::new(Method::Describe, "agent/cam1", 2);
        h.session.on_describe_request(&req).await.unwrap();

        let resp = h.responses.recv().await.unwrap();
        assert_eq!(resp.status, StatusCode::Ok);
        assert_eq!(h.session.phase(), SessionPhase::TargetResolved);

        let peer = h.session.peer().unwrap();
        assert_eq!(peer.kind(), SourceKind::Relay);
        assert_eq!(peer.locator(), "rtsp://b/");
    }

    #[tokio::test]
    async fn test_describe_default_source() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        let req = Request::new(Method::Describe, "agent", 2);
        h.session.on_describe_request(&req).await.unwrap();

        assert_eq!(h.responses.recv().await.unwrap().status, StatusCode::Ok);
        assert_eq!(h.session.peer().unwrap().kind(), SourceKind::Test);
    }

    #[tokio::test]
    async fn test_describe_unknown_target() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        for uri in ["agent/cam2", "other", "agent/"] {
            let req = Request::new(Method::Describe, uri, 3);
            h.session.on_describe_request(&req).await.unwrap();

            let resp = h.responses.recv().await.unwrap();
            assert_eq!(resp.status, StatusCode::NotFound);
            assert!(h.session.peer().is_none());
            assert_eq!(h.session.phase(), SessionPhase::Connected);
        }
    }

    #[tokio::test]
    async fn test_second_describe_rejected() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        let req = Request::new(Method::Describe, "agent/cam1", 2);
        h.session.on_describe_request(&req).await.unwrap();
        assert_eq!(h.responses.recv().await.unwrap().status, StatusCode::Ok);

        // Second resolution attempt must not disturb the bound peer
        let req = Request::new(Method::Describe, "agent", 3);
        h.session.on_describe_request(&req).await.unwrap();

        let resp = h.responses.recv().await.unwrap();
        assert_eq!(resp.status, StatusCode::MethodNotAllowed);
        let peer = h.session.peer().unwrap();
        assert_eq!(peer.kind(), SourceKind::Relay);
        assert_eq!(peer.locator(), "rtsp://b/");
    }

    #[tokio::test]
    async fn test_connected_issues_auth_and_ice_requests() {
        let registry = SourceRegistry::builder()
            .default_source(SourceDefinition::new(SourceKind::Test, "videotestsrc"))
            .build();
        let config =
            AgentConfig::new("agent").identity(AgentIdentity::new("agent").auth_token("secret"));
        let binder = binder_with(registry, config);
        let mut h = harness(&binder);

        h.session.on_connected().await.unwrap();
        assert_eq!(h.session.phase(), SessionPhase::Connected);

        let auth = h.requests.recv().await.unwrap();
        assert_eq!(auth.method, Method::SetParameter);
        assert_eq!(&auth.body[..], b"secret");

        let ice = h.requests.recv().await.unwrap();
        assert_eq!(ice.method, Method::GetParameter);
        assert_ne!(auth.cseq, ice.cseq);
    }

    #[tokio::test]
    async fn test_stale_auth_response_discarded() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        // Two authorization requests in flight; only the second token is live
        let first = h.session.request_authorization().await.unwrap();
        let second = h.session.request_authorization().await.unwrap();
        assert_ne!(first, second);

        assert!(!h
            .session
            .on_set_parameter_response(&Response::new(StatusCode::Ok, first)));
        assert!(h
            .session
            .on_set_parameter_response(&Response::new(StatusCode::Ok, second)));

        // A duplicate of the accepted response is stale too
        assert!(!h
            .session
            .on_set_parameter_response(&Response::new(StatusCode::Ok, second)));
    }

    #[tokio::test]
    async fn test_tokens_tracked_independently() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        let auth = h.session.request_authorization().await.unwrap();
        let ice = h.session.request_ice_servers().await.unwrap();

        // An ICE token is unknown to the authorization slot and vice versa
        assert!(!h
            .session
            .on_set_parameter_response(&Response::new(StatusCode::Ok, ice)));
        assert!(!h
            .session
            .on_get_parameter_response(&Response::new(StatusCode::Ok, auth)));

        assert!(h
            .session
            .on_set_parameter_response(&Response::new(StatusCode::Ok, auth)));
        assert!(h
            .session
            .on_get_parameter_response(&Response::new(StatusCode::Ok, ice)));
    }

    #[tokio::test]
    async fn test_teardown_releases_peer() {
        let binder = test_binder();
        let mut h = harness(&binder);
        h.session.on_connected().await.unwrap();

        let req = Request::new(Method::Describe, "agent/cam1", 2);
        h.session.on_describe_request(&req).await.unwrap();
        assert!(h.session.peer().is_some());

        h.session.on_teardown();
        assert!(h.session.peer().is_none());
        assert_eq!(h.session.phase(), SessionPhase::Closed);
    }

    #[tokio::test]
    async fn test_parameters_answered_from_cache() {
        let registry = SourceRegistry::builder()
            .default_source(SourceDefinition::new(SourceKind::Test, "videotestsrc"))
            .build();
        let config = AgentConfig::new("agent")
            .identity(AgentIdentity::new("agent").description("Garden agent"));
        let binder = binder_with(registry, config);
        let mut h = harness(&binder);

        let req = Request::new(Method::GetParameter, "agent", 7);
        h.session.on_get_parameter_request(&req).await.unwrap();

        let resp = h.responses.recv().await.unwrap();
        assert_eq!(&resp.body[..], b"name: agent\r\ndescription: Garden agent\r\n");

        h.session.on_get_parameter_request(&req).await.unwrap();
        assert_eq!(h.responses.recv().await.unwrap().body, resp.body);
    }
}
