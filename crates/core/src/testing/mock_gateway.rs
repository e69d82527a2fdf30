//! Mock lead gateway for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::gateway::{GatewayError, LeadBatch, LeadGateway, ServiceHealth};

/// A recorded query for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    /// The query text sent to the service.
    pub query: String,
    /// Requested number of sources.
    pub source_count: u32,
    /// When the query was made.
    pub timestamp: Instant,
}

/// A handler that answers specific queries, or `None` to fall through to the default batch.
type QueryHandler = Box<dyn Fn(&str) -> Option<Result<LeadBatch, GatewayError>> + Send + Sync>;

/// Mock implementation of the LeadGateway trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable batch, or per-query answers through a handler
/// - Delay individual queries to reproduce out-of-order completions
/// - Inject one-shot failures
/// - Track queries for assertions
///
/// # Example
///
/// ```rust,ignore
/// use leadfinder_core::testing::{fixtures, MockGateway};
///
/// let gateway = MockGateway::new();
/// gateway.set_delay("slow query", Duration::from_millis(200)).await;
/// gateway.set_next_error(GatewayError::NotFound).await;
///
/// let result = gateway.submit_query("anything", 3).await;
/// assert_eq!(result, Err(GatewayError::NotFound));
///
/// let queries = gateway.recorded_queries().await;
/// assert_eq!(queries.len(), 1);
/// ```
pub struct MockGateway {
    /// Batch returned when no handler answers.
    batch: Arc<RwLock<LeadBatch>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedQuery>>>,
    /// If set, the next query will fail with this error.
    next_error: Arc<RwLock<Option<GatewayError>>>,
    /// Per-query artificial latency.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Query handler for per-query answers.
    query_handler: Arc<RwLock<Option<QueryHandler>>>,
    /// Health probe answer.
    health: Arc<RwLock<Result<ServiceHealth, GatewayError>>>,
}

impl std::fmt::Debug for MockGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGateway")
            .field("batch", &"<batch>")
            .field("queries", &"<queries>")
            .field("next_error", &"<next_error>")
            .field("delays", &"<delays>")
            .field("query_handler", &"<handler>")
            .field("health", &"<health>")
            .finish()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Create a new mock gateway answering every query with an empty batch.
    pub fn new() -> Self {
        Self {
            batch: Arc::new(RwLock::new(LeadBatch::default())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delays: Arc::new(RwLock::new(HashMap::new())),
            query_handler: Arc::new(RwLock::new(None)),
            health: Arc::new(RwLock::new(Ok(ServiceHealth {
                status: "healthy".to_string(),
            }))),
        }
    }

    /// Create a mock gateway with a predefined batch.
    pub fn with_batch(batch: LeadBatch) -> Self {
        Self {
            batch: Arc::new(RwLock::new(batch)),
            ..Self::new()
        }
    }

    /// Set the batch returned for subsequent queries.
    pub async fn set_batch(&self, batch: LeadBatch) {
        *self.batch.write().await = batch;
    }

    /// Get recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Configure the next query to fail with the given error.
    pub async fn set_next_error(&self, error: GatewayError) {
        *self.next_error.write().await = Some(error);
    }

    /// Hold answers to `query` for `delay` before resolving.
    pub async fn set_delay(&self, query: &str, delay: Duration) {
        self.delays.write().await.insert(query.to_string(), delay);
    }

    /// Set a handler that answers queries dynamically.
    ///
    /// Returning `None` falls back to the configured batch.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// gateway.set_query_handler(|query| {
    ///     if query == "missing" {
    ///         Some(Err(GatewayError::NotFound))
    ///     } else {
    ///         None
    ///     }
    /// }).await;
    /// ```
    pub async fn set_query_handler<F>(&self, handler: F)
    where
        F: Fn(&str) -> Option<Result<LeadBatch, GatewayError>> + Send + Sync + 'static,
    {
        *self.query_handler.write().await = Some(Box::new(handler));
    }

    /// Clear the query handler.
    pub async fn clear_query_handler(&self) {
        *self.query_handler.write().await = None;
    }

    /// Set what the health probe reports.
    pub async fn set_health(&self, health: Result<ServiceHealth, GatewayError>) {
        *self.health.write().await = health;
    }

    async fn take_error(&self) -> Option<GatewayError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl LeadGateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit_query(
        &self,
        query: &str,
        source_count: u32,
    ) -> Result<LeadBatch, GatewayError> {
        self.queries.write().await.push(RecordedQuery {
            query: query.to_string(),
            source_count,
            timestamp: Instant::now(),
        });

        let delay = self.delays.read().await.get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let handler = self.query_handler.read().await;
        if let Some(ref h) = *handler {
            if let Some(result) = h(query) {
                return result;
            }
        }
        drop(handler);

        Ok(self.batch.read().await.clone())
    }

    async fn health(&self) -> Result<ServiceHealth, GatewayError> {
        self.health.read().await.clone()
    }
}
