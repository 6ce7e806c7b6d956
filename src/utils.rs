use crate::error::InertiaError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Prefixes a message so that it is easy to spot among the host application logs.
pub(crate) fn inertia_err_msg(msg: String) -> String {
    format!("[Inertia] {}", msg)
}

pub(crate) fn convert_struct_to_map<T>(s: T) -> Result<Map<String, Value>, InertiaError>
where
    T: Serialize,
{
    let struct_as_value = match serde_json::to_value(s) {
        Ok(value) => value,
        Err(_) => {
            return Err(InertiaError::SerializationError(
                "Struct is not JSON serializable.".into(),
            ))
        }
    };

    match serde_json::from_value(struct_as_value) {
        Ok(value) => Ok(value),
        Err(err) => Err(InertiaError::SerializationError(format!(
            "Failed to serialize struct as map: {}",
            err
        ))),
    }
}

pub(crate) fn convert_struct_to_stringified_json<T>(s: T) -> Result<String, InertiaError>
where
    T: Serialize,
{
    let map = convert_struct_to_map(s)?;
    serde_json::to_string(&map).map_err(|err| {
        InertiaError::SerializationError(format!("Failed to serialize map to json: {}", err))
    })
}
