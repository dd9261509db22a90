use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Settings handed to the driver when opening a session.
#[derive(Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    /// Target database name.
    pub database: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Driver connect string (`host:port/service`).
    #[serde(default)]
    pub connect_string: Option<String>,
    /// Rows fetched per round-trip, applied to every new session.
    #[serde(default)]
    pub prefetch_row_count: Option<NonZeroU32>,
}

impl ConnectionSettings {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn connect_string(mut self, connect_string: impl Into<String>) -> Self {
        self.connect_string = Some(connect_string.into());
        self
    }

    pub fn prefetch_row_count(mut self, rows: NonZeroU32) -> Self {
        self.prefetch_row_count = Some(rows);
        self
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("connect_string", &self.connect_string)
            .field("prefetch_row_count", &self.prefetch_row_count)
            .finish()
    }
}
