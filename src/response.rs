use crate::types::{Method, QueryDescriptor, RawResponse, Row, SqlValue};

/// Result shaped for the caller, depending on the query method.
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped {
    /// Every row of a select.
    Rows(Vec<Row>),
    /// One value per row: plucked column, or a single returned column.
    Values(Vec<SqlValue>),
    /// First row of a `first` query, `None` when nothing matched.
    First(Option<Row>),
    /// First plucked value of a `first` query.
    FirstValue(Option<SqlValue>),
    RowsAffected(u64),
    /// Driver response, untouched.
    Raw(RawResponse),
}

/// Shape the executed descriptor's response for the caller.
/// A custom `output` transform takes precedence over everything else.
pub fn process_response(descriptor: &QueryDescriptor) -> Shaped {
    let empty = RawResponse::empty();
    let response = descriptor.response.as_ref().unwrap_or(&empty);

    if let Some(output) = &descriptor.output {
        return output(response);
    }

    match descriptor.method {
        Method::Select | Method::Pluck | Method::First => {
            let rows = response.to_rows();
            let first = descriptor.method == Method::First;
            match &descriptor.pluck {
                Some(column) => {
                    let mut values = rows
                        .iter()
                        .map(|row| row.get(column).cloned().unwrap_or(SqlValue::Null));
                    if first {
                        Shaped::FirstValue(values.next())
                    } else {
                        Shaped::Values(values.collect())
                    }
                }
                None if first => Shaped::First(rows.into_iter().next()),
                None => Shaped::Rows(rows),
            }
        }
        Method::Insert | Method::Del | Method::Update | Method::Counter => {
            match &descriptor.returning {
                Some(returning) if !returning.is_empty() => {
                    if returning.single_column().is_some() {
                        // The follow-up fetch selected only the requested column.
                        Shaped::Values(response.to_rows().into_iter().flat_map(Row::into_values).collect())
                    } else {
                        Shaped::Raw(response.clone())
                    }
                }
                _ => Shaped::RowsAffected(descriptor.rows_affected.unwrap_or(0)),
            }
        }
        Method::Raw => Shaped::Raw(response.clone()),
    }
}
