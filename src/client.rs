use std::sync::Arc;

use crate::config::ConnectionSettings;
use crate::connection::{self, Connection};
use crate::dialect::ErrorCatalog;
use crate::error::Result;
use crate::executor::Executor;
use crate::response::{self, Shaped};
use crate::traits::{OracleDriver, RowSink, StreamOptions};
use crate::types::QueryDescriptor;

/// Main entry point for orabridge.
/// Binds a native driver to connection settings and the fatal-error catalog.
pub struct OracleClient {
    driver: Arc<dyn OracleDriver>,
    settings: ConnectionSettings,
    executor: Executor,
}

impl OracleClient {
    /// Create a new client over the given driver.
    pub fn with_driver(driver: Arc<dyn OracleDriver>, settings: ConnectionSettings) -> Self {
        Self {
            driver,
            settings,
            executor: Executor::default(),
        }
    }

    /// Replace the catalog used to spot connection-fatal errors.
    pub fn with_error_catalog(mut self, catalog: ErrorCatalog) -> Self {
        self.executor = Executor::new(catalog);
        self
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    pub fn database(&self) -> &str {
        connection::database(&self.settings)
    }

    /// Open a new connection for the pool.
    pub async fn acquire_connection(&self) -> Result<Connection> {
        connection::acquire(self.driver.as_ref(), &self.settings).await
    }

    /// Close a connection the pool is evicting.
    pub async fn destroy_connection(&self, connection: &mut Connection) -> Result<()> {
        connection::destroy(connection).await
    }

    /// Execute a compiled query, filling in its response.
    pub async fn query(&self, connection: &mut Connection, descriptor: &mut QueryDescriptor) -> Result<()> {
        self.executor.execute(connection, descriptor).await
    }

    /// Stream a read-only query into `sink`.
    pub async fn stream<S>(
        &self,
        connection: &mut Connection,
        descriptor: &QueryDescriptor,
        sink: &mut S,
        options: StreamOptions,
    ) -> Result<()>
    where
        S: RowSink + ?Sized,
    {
        self.executor.stream(connection, descriptor, sink, options).await
    }

    pub fn process_response(&self, descriptor: &QueryDescriptor) -> Shaped {
        response::process_response(descriptor)
    }

    /// Execute and shape the result in one call.
    pub async fn run(&self, connection: &mut Connection, mut descriptor: QueryDescriptor) -> Result<Shaped> {
        self.query(connection, &mut descriptor).await?;
        Ok(self.process_response(&descriptor))
    }
}
