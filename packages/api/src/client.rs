//! # Client: cached, de-duplicated access to the backend
//!
//! [`ApiClient`] is the one object views talk to. It owns:
//!
//! - the [`ApiConfig`] that turns endpoint paths into URLs,
//! - a [`Transport`] that actually sends requests,
//! - a [`QueryCache`] keyed by `(endpoint, argument)`,
//! - the set of fetches currently in flight.
//!
//! ## Queries
//!
//! [`query`](ApiClient::query) serves fresh cache hits without touching the
//! network. Otherwise it joins a fetch already in flight for the same key, or
//! starts one. A started fetch records its outcome in the cache when it finishes,
//! so every caller that awaited it sees the same result. Failures are recorded as
//! errors and never served as fresh, so the next call fetches again.
//!
//! A fetch in flight when its tags are invalidated, or when the client is
//! [`reset`](ApiClient::reset), is never joined again: the next caller starts a
//! new request, and the old one finishes without touching the cache.
//!
//! ## Mutations
//!
//! [`mutate`](ApiClient::mutate) is never cached or de-duplicated. After a
//! successful mutation every cache entry carrying one of the endpoint's
//! `invalidates` tags is marked stale; the cache revision moves and subscribed
//! views fetch again.
//!
//! Dropping the future returned by either method cancels interest in the result.
//! A query that nobody awaits any more stays parked until the next caller for the
//! same key picks it up.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;
use serde_json::Value;
use store::{CacheKey, FetchTicket, QueryCache, QueryState};
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::endpoint::Endpoint;
use crate::transport::{ApiRequest, Method, Transport};
use crate::ApiError;

type SharedFetch = Shared<LocalBoxFuture<'static, Result<Value, ApiError>>>;
type Inflight = HashMap<CacheKey, (FetchTicket, SharedFetch)>;

pub struct ApiClient<T> {
    config: Rc<ApiConfig>,
    transport: Rc<T>,
    cache: QueryCache<Value, ApiError>,
    inflight: Rc<RefCell<Inflight>>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: self.transport.clone(),
            cache: self.cache.clone(),
            inflight: self.inflight.clone(),
        }
    }
}

async fn execute<T: Transport>(
    transport: &T,
    config: &ApiConfig,
    endpoint: &Endpoint,
    params: &Value,
    body: Option<Value>,
) -> Result<Value, ApiError> {
    let path = endpoint.render_path(params)?;
    let request = ApiRequest {
        method: endpoint.method,
        url: config.url(&path),
        body: match endpoint.method {
            Method::Get => None,
            Method::Post => body,
        },
        credentials: endpoint.credentials,
    };
    let response = transport.send(request).await?;
    endpoint.decode(response)
}

impl<T: Transport + 'static> ApiClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self {
            config: Rc::new(config),
            transport: Rc::new(transport),
            cache: QueryCache::new(),
            inflight: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn cache(&self) -> &QueryCache<Value, ApiError> {
        &self.cache
    }

    /// Fetch `endpoint` for `params`, sharing the result with concurrent callers.
    pub async fn query(&self, endpoint: &'static Endpoint, params: Value) -> Result<Value, ApiError> {
        let key = CacheKey::new(endpoint.name, &params);
        if let Some(data) = self.cache.fresh(&key) {
            debug!(%key, "cache hit");
            return Ok(data);
        }
        self.fetch(endpoint, key, params).await
    }

    fn fetch(&self, endpoint: &'static Endpoint, key: CacheKey, params: Value) -> SharedFetch {
        if let Some((ticket, running)) = self.inflight.borrow().get(&key) {
            if self.cache.is_current(&key, *ticket) {
                debug!(%key, "joining in-flight request");
                return running.clone();
            }
            debug!(%key, "in-flight request is outdated, starting another");
        }

        let ticket = self.cache.begin(&key, endpoint.provides);
        let transport = self.transport.clone();
        let config = self.config.clone();
        let cache = self.cache.clone();
        let inflight = self.inflight.clone();
        let settle_key = key.clone();
        let future = async move {
            let result = execute(&*transport, &config, endpoint, &params, None).await;
            {
                let mut inflight = inflight.borrow_mut();
                if inflight.get(&settle_key).is_some_and(|(t, _)| *t == ticket) {
                    inflight.remove(&settle_key);
                }
            }
            if let Err(e) = &result {
                warn!(key = %settle_key, error = %e, "query failed");
            }
            if !cache.settle(&settle_key, ticket, result.clone()) {
                debug!(key = %settle_key, "discarding superseded response");
            }
            result
        }
        .boxed_local()
        .shared();

        self.inflight
            .borrow_mut()
            .insert(key, (ticket, future.clone()));
        future
    }

    /// Run a mutation and invalidate the tags it declares on success.
    pub async fn mutate(
        &self,
        endpoint: &'static Endpoint,
        params: Value,
        body: Value,
    ) -> Result<Value, ApiError> {
        let result = execute(&*self.transport, &self.config, endpoint, &params, Some(body)).await;
        match &result {
            Ok(_) => {
                let refetch = self.cache.invalidate(endpoint.invalidates);
                info!(
                    endpoint = endpoint.name,
                    refetch = refetch.len(),
                    "mutation succeeded"
                );
            }
            Err(e) => warn!(endpoint = endpoint.name, error = %e, "mutation failed"),
        }
        result
    }

    /// Current cached state of `endpoint` for `params`.
    pub fn state(&self, endpoint: &'static Endpoint, params: &Value) -> QueryState<Value, ApiError> {
        self.cache.read(&CacheKey::new(endpoint.name, params))
    }

    pub fn subscribe(&self, endpoint: &'static Endpoint, params: &Value) -> usize {
        self.cache
            .subscribe(&CacheKey::new(endpoint.name, params), endpoint.provides)
    }

    pub fn unsubscribe(&self, endpoint: &'static Endpoint, params: &Value) -> usize {
        self.cache.unsubscribe(&CacheKey::new(endpoint.name, params))
    }

    /// Forget every cached result and every request still in flight.
    pub fn reset(&self) {
        self.inflight.borrow_mut().clear();
        self.cache.clear();
    }

    /// A query that does nothing until [`LazyQuery::trigger`] is called.
    pub fn lazy(&self, endpoint: &'static Endpoint) -> LazyQuery<T> {
        LazyQuery {
            client: self.clone(),
            endpoint,
            last: Rc::new(RefCell::new(None)),
        }
    }
}

/// An on-demand query. Its state stays `Uninitialized` until the first trigger.
pub struct LazyQuery<T> {
    client: ApiClient<T>,
    endpoint: &'static Endpoint,
    last: Rc<RefCell<Option<CacheKey>>>,
}

impl<T> Clone for LazyQuery<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: self.endpoint,
            last: self.last.clone(),
        }
    }
}

impl<T: Transport + 'static> LazyQuery<T> {
    pub async fn trigger(&self, params: Value) -> Result<Value, ApiError> {
        *self.last.borrow_mut() = Some(CacheKey::new(self.endpoint.name, &params));
        self.client.query(self.endpoint, params).await
    }

    pub fn is_triggered(&self) -> bool {
        self.last.borrow().is_some()
    }

    pub fn state(&self) -> QueryState<Value, ApiError> {
        match self.last.borrow().as_ref() {
            Some(key) => self.client.cache.read(key),
            None => QueryState::Uninitialized,
        }
    }
}
