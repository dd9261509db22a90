//! orabridge - runs compiled, dialect-neutral queries on an Oracle driver session
//!
//! Handles the parts the native driver does not: `?` placeholders are renumbered to
//! `:1, :2, ...`, booleans and buffers are translated, `RETURNING` is emulated with out
//! parameters and a follow-up fetch, and sessions that hit a fatal error are marked so
//! the pool can evict them.
//!
//! # Example
//! ```ignore
//! use orabridge::{ConnectionSettings, Method, OracleClient, QueryDescriptor, Returning, SqlValue};
//!
//! let client = OracleClient::with_driver(driver, ConnectionSettings::new("orcl"));
//! let mut connection = client.acquire_connection().await?;
//!
//! let ids = client
//!     .run(
//!         &mut connection,
//!         QueryDescriptor::new(
//!             Method::Insert,
//!             "insert into users (name) values (?) returning ROWID into ?",
//!         )
//!         .bind("Alice")
//!         .bind(SqlValue::Returning)
//!         .returning(Returning::columns(["id"]), "select id from users where ROWID = ?"),
//!     )
//!     .await?;
//!
//! if !connection.is_reusable() {
//!     client.destroy_connection(&mut connection).await?;
//! }
//! ```

pub mod config;
pub mod connection;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod executor;
pub mod response;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use client::OracleClient;
pub use config::ConnectionSettings;
pub use connection::Connection;
pub use dialect::{ErrorCatalog, ErrorClass};
pub use error::{DriverError, OraBridgeError, Result, SinkError, StreamFailure};
pub use executor::{Executor, PreparedStatement};
pub use response::{process_response, Shaped};
pub use traits::{ChannelSink, DriverSession, OracleDriver, RowSink, StreamEvent, StreamOptions};
pub use types::{Method, QueryDescriptor, RawResponse, Returning, Row, SqlValue};
