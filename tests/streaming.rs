use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use orabridge::drivers::InMemoryTestDriver;
use orabridge::{
    ChannelSink, Connection, ConnectionSettings, DriverError, ErrorClass, Method, OraBridgeError,
    OracleClient, QueryDescriptor, Row, RowSink, SinkError, SqlValue, StreamEvent, StreamFailure,
    StreamOptions,
};

fn row(id: i64) -> Row {
    Row::new(&["id".to_string()], vec![SqlValue::Int64(id)])
}

async fn connect(driver: &InMemoryTestDriver) -> (OracleClient, Connection) {
    let client = OracleClient::with_driver(Arc::new(driver.clone()), ConnectionSettings::new("orcl"));
    let connection = client.acquire_connection().await.unwrap();
    (client, connection)
}

/// Collects everything it is handed; optionally rejects writes or the end signal.
#[derive(Default)]
struct RecordingSink {
    rows: Vec<Row>,
    failures: Vec<StreamFailure>,
    ended: usize,
    reject_write_after: Option<usize>,
    reject_end: bool,
}

#[async_trait]
impl RowSink for RecordingSink {
    async fn write(&mut self, row: Row) -> Result<(), SinkError> {
        if self.reject_write_after == Some(self.rows.len()) {
            return Err(SinkError::new("disk full"));
        }
        self.rows.push(row);
        Ok(())
    }

    async fn fail(&mut self, error: &StreamFailure) {
        self.failures.push(error.clone());
    }

    async fn end(&mut self) -> Result<(), SinkError> {
        self.ended += 1;
        if self.reject_end {
            return Err(SinkError::new("flush failed"));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_stream_pipes_rows_then_ends() {
    let driver = InMemoryTestDriver::new().with_stream(vec![Ok(row(1)), Ok(row(2)), Ok(row(3))]);
    let (client, mut connection) = connect(&driver).await;

    let descriptor = QueryDescriptor::new(Method::Select, "select id from users where active = ?").bind(true);
    let options = StreamOptions {
        fetch_size: NonZeroU32::new(50),
    };
    let mut sink = RecordingSink::default();

    client
        .stream(&mut connection, &descriptor, &mut sink, options)
        .await
        .unwrap();

    assert_eq!(sink.rows, vec![row(1), row(2), row(3)]);
    assert_eq!(sink.ended, 1);
    assert!(sink.failures.is_empty());

    let query = driver.last_query().unwrap();
    assert!(query.streamed);
    assert_eq!(query.sql, "select id from users where active = :1");
    assert_eq!(query.params, vec![SqlValue::Int64(1)]);
    assert_eq!(query.fetch_size, NonZeroU32::new(50));
}

#[tokio::test]
async fn test_stream_source_error_is_reemitted_once() {
    let message = "ORA-03113: end-of-file on communication channel";
    let driver = InMemoryTestDriver::new().with_stream(vec![
        Ok(row(1)),
        Err(DriverError::new(message)),
        Ok(row(2)),
    ]);
    let (client, mut connection) = connect(&driver).await;

    let descriptor = QueryDescriptor::new(Method::Select, "select id from users");
    let mut sink = RecordingSink::default();

    let err = client
        .stream(&mut connection, &descriptor, &mut sink, StreamOptions::default())
        .await
        .unwrap_err();

    match &err {
        OraBridgeError::Stream { source, class } => {
            assert_eq!(source, &StreamFailure::Source(DriverError::new(message)));
            assert_eq!(*class, ErrorClass::ConnectionFatal);
        }
        other => panic!("Expected Stream error, got {:?}", other),
    }
    assert_eq!(sink.rows, vec![row(1)]);
    assert_eq!(sink.failures, vec![StreamFailure::Source(DriverError::new(message))]);
    assert_eq!(sink.ended, 0);
    assert_eq!(connection.disposed().map(|e| e.message.as_str()), Some(message));
}

#[tokio::test]
async fn test_stream_sink_error_resolves_failure() {
    let driver = InMemoryTestDriver::new().with_stream(vec![Ok(row(1)), Ok(row(2)), Ok(row(3))]);
    let (client, mut connection) = connect(&driver).await;

    let descriptor = QueryDescriptor::new(Method::Select, "select id from users");
    let mut sink = RecordingSink {
        reject_write_after: Some(1),
        ..RecordingSink::default()
    };

    let err = client
        .stream(&mut connection, &descriptor, &mut sink, StreamOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "disk full");
    assert_eq!(err.class(), Some(ErrorClass::QueryLevel));
    assert_eq!(sink.rows, vec![row(1)]);
    assert!(sink.failures.is_empty());
    assert_eq!(sink.ended, 0);
    assert!(connection.is_reusable());
}

#[tokio::test]
async fn test_stream_end_error_resolves_failure() {
    let driver = InMemoryTestDriver::new().with_stream(vec![Ok(row(1))]);
    let (client, mut connection) = connect(&driver).await;

    let descriptor = QueryDescriptor::new(Method::Select, "select id from users");
    let mut sink = RecordingSink {
        reject_end: true,
        ..RecordingSink::default()
    };

    let err = client
        .stream(&mut connection, &descriptor, &mut sink, StreamOptions::default())
        .await
        .unwrap_err();

    match err {
        OraBridgeError::Stream { source, .. } => {
            assert_eq!(source, StreamFailure::Sink(SinkError::new("flush failed")));
        }
        other => panic!("Expected Stream error, got {:?}", other),
    }
    assert_eq!(sink.ended, 1);
}

#[tokio::test]
async fn test_stream_leaves_returning_marker_untranslated() {
    let driver = InMemoryTestDriver::new().with_stream(vec![Ok(row(1))]);
    let (client, mut connection) = connect(&driver).await;

    let descriptor = QueryDescriptor::new(Method::Insert, "insert into t (a) values (?) returning ROWID into ?")
        .bind(true)
        .bind(SqlValue::Returning);
    let mut sink = RecordingSink::default();

    client
        .stream(&mut connection, &descriptor, &mut sink, StreamOptions::default())
        .await
        .unwrap();

    let query = driver.last_query().unwrap();
    assert_eq!(query.sql, "insert into t (a) values (:1) returning ROWID into :2");
    assert_eq!(query.params, vec![SqlValue::Int64(1), SqlValue::Returning]);
    assert!(descriptor.out_params.is_empty());
}

#[tokio::test]
async fn test_stream_empty_sql_fails_without_io() {
    let driver = InMemoryTestDriver::new();
    let (client, mut connection) = connect(&driver).await;

    let mut sink = RecordingSink::default();
    let err = client
        .stream(
            &mut connection,
            &QueryDescriptor::new(Method::Select, ""),
            &mut sink,
            StreamOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OraBridgeError::EmptyQuery));
    driver.assert_query_count(0);
    assert_eq!(sink.ended, 0);
}

#[tokio::test]
async fn test_channel_sink_delivers_events() {
    let driver = InMemoryTestDriver::new().with_stream(vec![
        Ok(row(1)),
        Err(DriverError::new("ORA-01013: user requested cancel of current operation")),
    ]);
    let (client, mut connection) = connect(&driver).await;
    let (mut sink, mut rx) = ChannelSink::channel(8);

    let err = client
        .stream(
            &mut connection,
            &QueryDescriptor::new(Method::Select, "select id from users"),
            &mut sink,
            StreamOptions::default(),
        )
        .await
        .unwrap_err();
    drop(sink);

    assert_eq!(err.class(), Some(ErrorClass::QueryLevel));
    assert_eq!(rx.recv().await, Some(StreamEvent::Row(row(1))));
    assert!(matches!(rx.recv().await, Some(StreamEvent::Error(StreamFailure::Source(_)))));
    assert_eq!(rx.recv().await, None);
    assert!(connection.is_reusable());
}

#[tokio::test]
async fn test_channel_sink_reports_dropped_receiver() {
    let driver = InMemoryTestDriver::new().with_stream(vec![Ok(row(1))]);
    let (client, mut connection) = connect(&driver).await;
    let (mut sink, rx) = ChannelSink::channel(1);
    drop(rx);

    let err = client
        .stream(
            &mut connection,
            &QueryDescriptor::new(Method::Select, "select id from users"),
            &mut sink,
            StreamOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OraBridgeError::Stream {
            source: StreamFailure::Sink(_),
            ..
        }
    ));
}
