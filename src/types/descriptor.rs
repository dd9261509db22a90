use std::fmt;
use std::sync::Arc;

use crate::response::Shaped;
use crate::types::{RawResponse, SqlValue};

/// Kind of query a descriptor was compiled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Select,
    Pluck,
    First,
    Insert,
    Update,
    Del,
    Counter,
    Raw,
}

impl Method {
    /// Insert, update, delete and counter statements change rows.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Method::Insert | Method::Update | Method::Del | Method::Counter
        )
    }
}

/// Columns requested back from a mutating statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Returning {
    /// `*`
    All,
    Columns(Vec<String>),
}

impl Returning {
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Returning::Columns(columns.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Returning::All => false,
            Returning::Columns(cols) => cols.is_empty(),
        }
    }

    /// The lone requested column, if exactly one named column was asked for.
    pub fn single_column(&self) -> Option<&str> {
        match self {
            Returning::Columns(cols) if cols.len() == 1 && cols[0] != "*" => {
                Some(cols[0].as_str())
            }
            _ => None,
        }
    }
}

/// Caller-supplied transform that replaces response normalization.
pub type OutputFn = Arc<dyn Fn(&RawResponse) -> Shaped + Send + Sync>;

/// A compiled query moving through translation, execution and normalization.
///
/// `sql` uses `?` for every positional parameter, in the same order as `bindings`.
/// Execution fills in `response` and `rows_affected`.
#[derive(Clone)]
pub struct QueryDescriptor {
    pub sql: String,
    pub bindings: Vec<SqlValue>,
    pub method: Method,
    pub returning: Option<Returning>,
    /// Column to project rows onto for `Method::Pluck` (and optionally `First`).
    pub pluck: Option<String>,
    /// Out-parameter slots allocated for `SqlValue::Returning` bindings.
    pub out_params: Vec<String>,
    /// Follow-up statement fetching returned columns by row identifier.
    pub returning_sql: Option<String>,
    pub output: Option<OutputFn>,
    pub response: Option<RawResponse>,
    pub rows_affected: Option<u64>,
}

impl QueryDescriptor {
    pub fn new(method: Method, sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: Vec::new(),
            method,
            returning: None,
            pluck: None,
            out_params: Vec::new(),
            returning_sql: None,
            output: None,
            response: None,
            rows_affected: None,
        }
    }

    pub fn bindings(mut self, bindings: impl IntoIterator<Item = SqlValue>) -> Self {
        self.bindings = bindings.into_iter().collect();
        self
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.bindings.push(value.into());
        self
    }

    /// Request columns back from a mutating statement, fetched by `returning_sql`.
    pub fn returning(mut self, returning: Returning, returning_sql: impl Into<String>) -> Self {
        self.returning = Some(returning);
        self.returning_sql = Some(returning_sql.into());
        self
    }

    pub fn pluck(mut self, column: impl Into<String>) -> Self {
        self.pluck = Some(column.into());
        self
    }

    pub fn with_output<F>(mut self, output: F) -> Self
    where
        F: Fn(&RawResponse) -> Shaped + Send + Sync + 'static,
    {
        self.output = Some(Arc::new(output));
        self
    }

    /// True when a non-empty `returning` was asked of a mutating statement.
    pub fn returning_requested(&self) -> bool {
        self.method.is_mutating() && self.returning.as_ref().is_some_and(|r| !r.is_empty())
    }
}

impl fmt::Debug for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDescriptor")
            .field("sql", &self.sql)
            .field("bindings", &self.bindings)
            .field("method", &self.method)
            .field("returning", &self.returning)
            .field("pluck", &self.pluck)
            .field("out_params", &self.out_params)
            .field("returning_sql", &self.returning_sql)
            .field("output", &self.output.as_ref().map(|_| "<fn>"))
            .field("response", &self.response)
            .field("rows_affected", &self.rows_affected)
            .finish()
    }
}
