//! HTTP exchange: the transport seam and the store drain loop.
//!
//! Transport is a caller-supplied collaborator; this module owns request
//! construction (headers, correlation identifier) and the round-by-round
//! reconciliation of store entry statuses. Everything is synchronous: each
//! drain round blocks on its transport call before the next begins.

use bytes::Bytes;

use crate::{
    assemble::{self, Body},
    config::Config,
    error::{TransportError, UplinkError},
    item::Item,
    store::Store,
    wire::token,
};

/// One outbound HTTP request handed to the transport.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

/// The transport's view of an HTTP response.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<Bytes>,
}

impl HttpResponse {
    /// Whether the status commits the exchanged body.
    #[must_use]
    pub const fn is_success(&self) -> bool { self.status >= 200 && self.status < 300 }
}

/// Pluggable synchronous HTTP transport.
pub trait Transport {
    /// Send `request`, returning the response or a transport failure.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for network, TLS, or protocol failures.
    /// Status handling is the exchange layer's job, not the transport's.
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Drives single items and stores through a [`Transport`].
#[derive(Debug)]
pub struct Exchange<T> {
    config: Config,
    transport: T,
}

impl<T: Transport> Exchange<T> {
    /// Create an exchange over `transport` with `config`.
    pub const fn new(config: Config, transport: T) -> Self { Self { config, transport } }

    /// The configuration this exchange was built with.
    #[must_use]
    pub const fn config(&self) -> &Config { &self.config }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T { &self.transport }

    /// Mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T { &mut self.transport }

    /// Render and send one item in a single request.
    ///
    /// # Errors
    ///
    /// Returns validation and size errors before any transport call, and
    /// transport errors (including non-2xx statuses) afterwards.
    pub fn send_item(&mut self, item: &mut Item) -> Result<(), UplinkError> {
        let body = assemble::assemble_item(item, self.config.max_http_payload_size())?;
        self.post(body)
    }

    /// Drain `store` until every entry is sent or no progress is possible.
    ///
    /// Each round selects a maximal fitting batch, posts one body, and on
    /// success removes the sent entries. A transport failure rolls the
    /// in-flight round back to `Ready` and is propagated without further
    /// retries; entries that can never fit alone are left `Ignored` in the
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`UplinkError::StoreIsEmpty`],
    /// [`UplinkError::ItemExceedsMaxHttpRequestSize`] when the store cannot
    /// make progress, or the propagated transport/render error of a failed
    /// round.
    pub fn send_store(&mut self, store: &mut Store) -> Result<(), UplinkError> {
        loop {
            let body = assemble::assemble_store(store, self.config.max_http_payload_size())?;
            if let Err(err) = self.post(body) {
                store.rollback_selected();
                return Err(err);
            }

            let committed = store.commit_selected();
            log::debug!(
                "drain round committed {committed} entries, {} remaining",
                store.len(),
            );
            if !store.has_ready() {
                // Done: anything left is permanently ignored.
                return Ok(());
            }
            if committed == 0 {
                // Last-resort invariant guard: `assemble_store` already
                // errors on an empty selection, so a posted round commits at
                // least one entry. A round that moved nothing cannot
                // converge, so stop rather than loop forever.
                return Err(UplinkError::ItemExceedsMaxHttpRequestSize {
                    size: store.max_cached_size().unwrap_or(0),
                    max: self.config.max_http_payload_size(),
                });
            }
        }
    }

    fn post(&mut self, body: Body) -> Result<(), UplinkError> {
        let correlation_id = token::correlation_id();
        let request = HttpRequest {
            url: self.config.upload_url().to_owned(),
            method: "POST".to_owned(),
            headers: vec![
                ("Content-Type".to_owned(), body.content_type()),
                ("Accept".to_owned(), "application/json".to_owned()),
                ("Correlation-ID".to_owned(), correlation_id.clone()),
            ],
            body: body.into_bytes(),
        };
        log::debug!(
            "posting {} bytes to {} (correlation id {correlation_id})",
            request.body.len(),
            request.url,
        );

        let response = self.transport.send(&request)?;
        if response.is_success() {
            Ok(())
        } else {
            log::warn!(
                "exchange rejected with status {} (correlation id {correlation_id})",
                response.status,
            );
            Err(TransportError::UnexpectedStatus {
                status: response.status,
            }
            .into())
        }
    }
}
