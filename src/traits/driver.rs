use std::num::NonZeroU32;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::ConnectionSettings;
use crate::error::DriverError;
use crate::types::{OutParam, OutParamKind, RawResponse, Row, SqlValue};

/// Trait for the native driver.
/// The driver only opens sessions; everything else goes through `DriverSession`.
#[async_trait]
pub trait OracleDriver: Send + Sync {
    /// Open a new session. Must not retry.
    async fn connect(&self, settings: &ConnectionSettings)
        -> Result<Box<dyn DriverSession>, DriverError>;
}

/// Options forwarded to the driver's result reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Rows the reader pulls per round-trip.
    pub fetch_size: Option<NonZeroU32>,
}

/// One live database session.
/// Drivers are responsible for:
/// - Executing statements with numbered (`:1`, `:2`, ...) placeholders
/// - Filling allocated out parameters into `RawResponse::out_binds` by slot name
/// - Reporting failures with the vendor's message untouched
#[async_trait]
pub trait DriverSession: Send {
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<RawResponse, DriverError>;

    /// Open a row-by-row reader over a query.
    fn query_stream(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        options: StreamOptions,
    ) -> BoxStream<'_, Result<Row, DriverError>>;

    fn set_prefetch_row_count(&mut self, rows: NonZeroU32);

    /// Allocate an output parameter bound to `slot`.
    fn out_param(&self, kind: OutParamKind, slot: String) -> OutParam {
        OutParam::new(kind, slot)
    }

    /// Close the session. Closing twice is an error.
    async fn close(&mut self) -> Result<(), DriverError>;
}
