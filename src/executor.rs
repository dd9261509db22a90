use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{debug, info_span, Instrument};

use crate::connection::Connection;
use crate::dialect::{position_bindings, prep_bindings, ErrorCatalog, ErrorClass};
use crate::error::{DriverError, OraBridgeError, Result, StreamFailure};
use crate::traits::{DriverSession, RowSink, StreamOptions};
use crate::types::{QueryDescriptor, RawResponse, Row, SqlValue};

/// A statement ready for the wire: numbered placeholders and driver-native values.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
    /// Out-parameter slots allocated for `SqlValue::Returning` bindings.
    pub out_params: Vec<String>,
}

impl PreparedStatement {
    pub fn prepare(sql: &str, bindings: &[SqlValue], session: Option<&dyn DriverSession>) -> Self {
        let translated = prep_bindings(bindings, session);
        Self {
            sql: position_bindings(sql),
            params: translated.values,
            out_params: translated.out_params,
        }
    }
}

/// Progress of one `execute` call.
enum Phase {
    Executed(RawResponse),
    FetchingReturning { row_ids: Vec<SqlValue> },
    Done(RawResponse),
}

/// Runs descriptors against a leased connection.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    catalog: ErrorCatalog,
}

impl Executor {
    pub fn new(catalog: ErrorCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        &self.catalog
    }

    /// Execute the descriptor, filling in `response` and `rows_affected`.
    ///
    /// When a mutating statement requested `returning`, the generated row identifiers are
    /// read from the out parameters and `returning_sql` is run with them; its result becomes
    /// the final response. If that follow-up fails, the error is returned but
    /// `rows_affected` keeps the first statement's count.
    pub async fn execute(
        &self,
        connection: &mut Connection,
        descriptor: &mut QueryDescriptor,
    ) -> Result<()> {
        let span = info_span!("oracle.query", method = ?descriptor.method);
        self.execute_phases(connection, descriptor)
            .instrument(span)
            .await
    }

    async fn execute_phases(
        &self,
        connection: &mut Connection,
        descriptor: &mut QueryDescriptor,
    ) -> Result<()> {
        if descriptor.sql.is_empty() {
            return Err(OraBridgeError::EmptyQuery);
        }
        let returning = descriptor.returning_requested();
        if returning && descriptor.returning_sql.is_none() {
            return Err(OraBridgeError::MissingReturningSql);
        }

        // Out parameters exist only for a returning mutation; anywhere else `Returning`
        // is handed to the driver untouched.
        let session = returning.then(|| connection.session());
        let statement = PreparedStatement::prepare(&descriptor.sql, &descriptor.bindings, session);
        if returning && statement.out_params.is_empty() {
            return Err(OraBridgeError::MissingReturningBinding);
        }
        descriptor.out_params = statement.out_params;

        debug!(sql = %statement.sql, params = statement.params.len(), "executing statement");
        let first = self.run(connection, &statement.sql, &statement.params).await?;
        descriptor.rows_affected = first.update_count;

        let mut phase = Phase::Executed(first);
        loop {
            phase = match phase {
                Phase::Executed(first) if returning => Phase::FetchingReturning {
                    row_ids: returning_row_ids(&descriptor.out_params, &first)?,
                },
                Phase::Executed(first) => Phase::Done(first),
                Phase::FetchingReturning { row_ids } => {
                    let sql = position_bindings(descriptor.returning_sql.as_deref().unwrap_or_default());
                    debug!(sql = %sql, rows = row_ids.len(), "fetching returned columns");
                    Phase::Done(self.run(connection, &sql, &row_ids).await?)
                }
                Phase::Done(response) => {
                    if response.update_count.is_some() {
                        descriptor.rows_affected = response.update_count;
                    }
                    descriptor.response = Some(response);
                    return Ok(());
                }
            };
        }
    }

    /// One round-trip. Fatal failures mark the connection before the error is returned.
    async fn run(
        &self,
        connection: &mut Connection,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<RawResponse> {
        let result = connection.session_mut().execute(sql, params).await;
        match result {
            Ok(response) => Ok(response),
            Err(source) => {
                let class = self.classify(connection, &source);
                Err(OraBridgeError::Execution { source, class })
            }
        }
    }

    /// Stream a read-only query into `sink`.
    ///
    /// No out parameters are allocated; a `Returning` binding reaches the driver as is.
    ///
    /// Resolves once the sink has accepted `end`. The first error from either the source
    /// or the sink resolves the call; a source error is also handed to `sink.fail`.
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
        if descriptor.sql.is_empty() {
            return Err(OraBridgeError::EmptyQuery);
        }

        let statement = PreparedStatement::prepare(&descriptor.sql, &descriptor.bindings, None);
        debug!(sql = %statement.sql, params = statement.params.len(), "streaming statement");

        let outcome = {
            let mut rows = connection
                .session_mut()
                .query_stream(&statement.sql, &statement.params, options);
            pump(&mut rows, sink).await
        };

        outcome.map_err(|source| {
            let cause = DriverError::new(source.message());
            let class = self.classify(connection, &cause);
            OraBridgeError::Stream { source, class }
        })
    }

    fn classify(&self, connection: &mut Connection, error: &DriverError) -> ErrorClass {
        let class = self.catalog.classify(&error.message);
        if class == ErrorClass::ConnectionFatal {
            connection.mark_disposed(error.clone());
        }
        class
    }
}

/// Row identifiers from the out-parameter slots, in slot order.
fn returning_row_ids(out_params: &[String], response: &RawResponse) -> Result<Vec<SqlValue>> {
    out_params
        .iter()
        .map(|slot| {
            response
                .out_bind(slot)
                .cloned()
                .ok_or_else(|| OraBridgeError::MissingOutParam { slot: slot.clone() })
        })
        .collect()
}

async fn pump<S>(
    rows: &mut BoxStream<'_, std::result::Result<Row, DriverError>>,
    sink: &mut S,
) -> std::result::Result<(), StreamFailure>
where
    S: RowSink + ?Sized,
{
    while let Some(item) = rows.next().await {
        match item {
            Ok(row) => sink.write(row).await.map_err(StreamFailure::Sink)?,
            Err(error) => {
                let failure = StreamFailure::Source(error);
                sink.fail(&failure).await;
                return Err(failure);
            }
        }
    }
    sink.end().await.map_err(StreamFailure::Sink)
}
