use std::fmt;
use std::num::NonZeroU32;

use tracing::{info, warn};

use crate::config::ConnectionSettings;
use crate::error::{DriverError, OraBridgeError, Result};
use crate::traits::{DriverSession, OracleDriver};

/// One live session, leased from the pool for the duration of a query.
///
/// The adapter never closes a connection on its own. When a connection-fatal error is
/// observed the error is stored in `disposed`, and the pool must destroy the connection
/// instead of leasing it again.
pub struct Connection {
    session: Box<dyn DriverSession>,
    disposed: Option<DriverError>,
    prefetch_row_count: Option<NonZeroU32>,
}

impl Connection {
    /// Wrap an already-open driver session.
    pub fn new(session: Box<dyn DriverSession>) -> Self {
        Self {
            session,
            disposed: None,
            prefetch_row_count: None,
        }
    }

    /// The error that killed this connection, if any.
    pub fn disposed(&self) -> Option<&DriverError> {
        self.disposed.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.is_some()
    }

    /// Pre-lease check for the pool.
    pub fn is_reusable(&self) -> bool {
        !self.is_disposed()
    }

    pub fn prefetch_row_count(&self) -> Option<NonZeroU32> {
        self.prefetch_row_count
    }

    pub(crate) fn session(&self) -> &dyn DriverSession {
        self.session.as_ref()
    }

    pub(crate) fn session_mut(&mut self) -> &mut dyn DriverSession {
        self.session.as_mut()
    }

    /// Record the fatal error. The first one is kept.
    pub(crate) fn mark_disposed(&mut self, error: DriverError) {
        if self.disposed.is_none() {
            warn!(error = %error, "connection marked as disposed");
            self.disposed = Some(error);
        }
    }

    fn apply_prefetch_row_count(&mut self, rows: NonZeroU32) {
        self.session.set_prefetch_row_count(rows);
        self.prefetch_row_count = Some(rows);
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("disposed", &self.disposed)
            .field("prefetch_row_count", &self.prefetch_row_count)
            .finish_non_exhaustive()
    }
}

/// Open a new session. Never retries; that is the pool's job.
pub async fn acquire(driver: &dyn OracleDriver, settings: &ConnectionSettings) -> Result<Connection> {
    if settings.database.is_empty() {
        return Err(OraBridgeError::Connect {
            source: DriverError::new("connection settings are missing the target database"),
        });
    }

    let session = driver
        .connect(settings)
        .await
        .map_err(|source| OraBridgeError::Connect { source })?;

    let mut connection = Connection::new(session);
    if let Some(rows) = settings.prefetch_row_count {
        connection.apply_prefetch_row_count(rows);
    }

    info!(database = %settings.database, "opened connection");
    Ok(connection)
}

/// Close the session. Not idempotent: closing a dead session surfaces the driver error.
pub async fn destroy(connection: &mut Connection) -> Result<()> {
    connection
        .session
        .close()
        .await
        .map_err(|source| OraBridgeError::Destroy { source })?;

    info!("closed connection");
    Ok(())
}

/// Configured database name.
pub fn database(settings: &ConnectionSettings) -> &str {
    &settings.database
}
