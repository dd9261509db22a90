use crate::traits::DriverSession;
use crate::types::{out_param_slot, OutParamKind, SqlValue};

/// Translated bindings plus the out-parameter slots allocated along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedBindings {
    pub values: Vec<SqlValue>,
    pub out_params: Vec<String>,
}

/// Converts dialect-neutral bindings into values the driver accepts, one to one.
///
/// - `Returning` becomes a string out parameter, but only when a session is available
/// - `Bool` becomes `1` or `0`
/// - `Bytes` becomes lowercase hex text
/// - everything else passes through
pub fn prep_bindings(
    bindings: &[SqlValue],
    session: Option<&dyn DriverSession>,
) -> TranslatedBindings {
    let mut out_params = Vec::new();
    let values = bindings
        .iter()
        .map(|value| match (value, session) {
            (SqlValue::Returning, Some(session)) => {
                let slot = out_param_slot(out_params.len());
                out_params.push(slot.clone());
                SqlValue::OutParam(session.out_param(OutParamKind::String, slot))
            }
            (SqlValue::Bool(b), _) => SqlValue::Int64(i64::from(*b)),
            (SqlValue::Bytes(bytes), _) => SqlValue::Text(hex::encode(bytes)),
            (other, _) => other.clone(),
        })
        .collect();

    TranslatedBindings { values, out_params }
}
