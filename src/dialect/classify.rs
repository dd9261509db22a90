use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Whether a failure killed the session or only the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The session is unusable and must be evicted from the pool.
    ConnectionFatal,
    /// The statement failed; the session can be reused.
    QueryLevel,
}

/// Oracle error codes that mean the session is gone.
pub const ORACLE_FATAL_PREFIXES: &[&str] = &[
    "ORA-03114", // not connected to ORACLE
    "ORA-03113", // end-of-file on communication channel
    "ORA-03135", // connection lost contact
    "ORA-12514", // listener does not currently know of service requested
    "ORA-00022", // invalid session ID; access denied
    "ORA-00028", // your session has been killed
    "ORA-00031", // your session has been marked for kill
    "ORA-00045", // your session has been terminated with no replay
    "ORA-00378", // buffer pools cannot be created as specified
    "ORA-00602", // internal programming exception
    "ORA-00603", // ORACLE server session terminated by fatal error
    "ORA-00609", // could not attach to incoming connection
    "ORA-01012", // not logged on
    "ORA-01041", // internal error. hostdef extension doesn't exist
    "ORA-01043", // user side memory corruption
    "ORA-01089", // immediate shutdown or close in progress
    "ORA-01092", // ORACLE instance terminated. Disconnection forced
    "ORA-02396", // exceeded maximum idle time, please connect again
    "ORA-03122", // attempt to close ORACLE-side window on user side
    "ORA-12153", // TNS:not connected
    "ORA-12537", // TNS:connection closed
    "ORA-12547", // TNS:lost contact
    "ORA-12570", // TNS:packet reader failure
    "ORA-12583", // TNS:no reader
    "ORA-27146", // post/wait initialization failed
    "ORA-28511", // lost RPC connection
    "ORA-56600", // an illegal OCI function call was issued
];

/// Ordered list of message prefixes marking connection-fatal errors.
/// Deserializes from a plain list of strings, so a dialect can ship its own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ErrorCatalog {
    prefixes: Vec<Cow<'static, str>>,
}

impl ErrorCatalog {
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Cow<'static, str>>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn oracle() -> Self {
        Self::new(ORACLE_FATAL_PREFIXES.iter().copied())
    }

    /// Extend the catalog with an extra prefix, checked after the existing ones.
    pub fn with_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn prefixes(&self) -> &[Cow<'static, str>] {
        &self.prefixes
    }

    /// Matches `message` against each prefix at offset 0.
    pub fn classify(&self, message: &str) -> ErrorClass {
        if self
            .prefixes
            .iter()
            .any(|prefix| message.starts_with(&**prefix))
        {
            ErrorClass::ConnectionFatal
        } else {
            ErrorClass::QueryLevel
        }
    }
}

impl Default for ErrorCatalog {
    fn default() -> Self {
        Self::oracle()
    }
}
