//! Shared API client and the hooks that read through it.
//!
//! [`QueryClient`] pairs the app's [`PortalClient`] with a revision signal. Every
//! [`use_query`] resource reads that signal, so moving it after a mutation re-runs
//! them all: unaffected queries are answered from the cache, invalidated ones go
//! back to the network.

use std::future::Future;

use api::{ApiClient, ApiConfig, ApiError, Endpoint, HttpTransport, LazyQuery, PortalClient};
use dioxus::prelude::*;
use serde_json::Value;
use store::QueryState;

/// Build the client for the running app from configuration.
pub fn make_client() -> Result<PortalClient, ApiError> {
    let config = ApiConfig::load()?;
    tracing::info!("API base URL: {}", config.base_url);
    Ok(ApiClient::new(config, HttpTransport::new()?))
}

#[derive(Clone)]
pub struct QueryClient {
    client: PortalClient,
    revision: Signal<u64>,
}

impl QueryClient {
    pub fn new(client: PortalClient, revision: Signal<u64>) -> Self {
        Self { client, revision }
    }

    pub fn client(&self) -> PortalClient {
        self.client.clone()
    }

    /// Publish the cache revision so dependent queries re-run.
    pub fn sync(&mut self) {
        let current = self.client.cache().revision();
        if *self.revision.peek() != current {
            self.revision.set(current);
        }
    }

    fn track(&self) -> u64 {
        *self.revision.read()
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
}

/// Build the client once and provide a [`QueryClient`] to the component tree.
#[component]
pub fn QueryProvider(children: Element) -> Element {
    let revision = use_signal(|| 0u64);
    let client = use_hook(|| {
        make_client().map_err(|e| {
            tracing::error!("Failed to build API client: {}", e);
            e.user_message()
        })
    });
    // The outcome above is fixed for the component's lifetime, so hook order is stable.
    let client = match client {
        Ok(client) => client,
        Err(message) => {
            return rsx! {
                div { class: "portal-fatal", "The portal could not start: {message}" }
            };
        }
    };
    use_context_provider(|| QueryClient::new(client, revision));

    rsx! {
        {children}
    }
}

/// Run `fetch` on mount and again whenever a mutation invalidates the cache.
///
/// `endpoint` is subscribed while the component is mounted, so invalidating one
/// of its tags reports it for refetch.
pub fn use_query<R, F, Fut>(endpoint: &'static Endpoint, fetch: F) -> Resource<Result<R, ApiError>>
where
    R: 'static,
    F: Fn(PortalClient) -> Fut + 'static,
    Fut: Future<Output = Result<R, ApiError>> + 'static,
{
    let query = use_query_client();

    let subscriber = query.client();
    use_hook(move || {
        subscriber.subscribe(endpoint, &Value::Null);
    });
    let unsubscriber = query.client();
    use_drop(move || {
        unsubscriber.unsubscribe(endpoint, &Value::Null);
    });

    use_resource(move || {
        query.track();
        fetch(query.client())
    })
}

/// A deferred query bound to a component.
#[derive(Clone, Copy, PartialEq)]
pub struct LazyHandle {
    query: Signal<LazyQuery<HttpTransport>>,
    state: Signal<QueryState<Value, ApiError>>,
}

impl LazyHandle {
    pub fn state(&self) -> QueryState<Value, ApiError> {
        self.state.read().clone()
    }

    /// Start the fetch. Repeated triggers reuse the cache.
    pub fn trigger(&self, params: Value) {
        let lazy = self.query.peek().clone();
        let mut state = self.state;
        state.set(QueryState::Loading);
        spawn(async move {
            if let Err(e) = lazy.trigger(params).await {
                tracing::warn!("Deferred query failed: {}", e);
            }
            state.set(lazy.state());
        });
    }
}

/// A query that waits for [`LazyHandle::trigger`].
pub fn use_lazy_query(make: impl FnOnce(&PortalClient) -> LazyQuery<HttpTransport>) -> LazyHandle {
    let query = use_query_client();
    let lazy = use_signal(move || make(&query.client));
    let state = use_signal(|| QueryState::Uninitialized);
    LazyHandle { query: lazy, state }
}
