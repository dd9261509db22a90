mod descriptor;
mod row;
mod sql_value;

pub use descriptor::{Method, OutputFn, QueryDescriptor, Returning};
pub use row::{RawResponse, Row};
pub use sql_value::{out_param_slot, OutParam, OutParamKind, SqlValue};
