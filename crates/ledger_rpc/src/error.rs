use jsonrpsee::{
    core::Error,
    types::error::{CallError, ErrorObject},
};
use ledger::{ErrorKind, LedgerError};
use serde_json::json;

pub const INVALID_ARGUMENT_CODE: i32 = -32001;
pub const NOT_FOUND_CODE: i32 = -32002;
pub const INVALID_STATE_CODE: i32 = -32003;
pub const CONFLICT_CODE: i32 = -32004;
pub const UNAUTHORIZED_CODE: i32 = -32005;

/// JSON-RPC error code reserved for a ledger failure kind.
pub fn error_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::InvalidArgument => INVALID_ARGUMENT_CODE,
        ErrorKind::NotFound => NOT_FOUND_CODE,
        ErrorKind::InvalidState => INVALID_STATE_CODE,
        ErrorKind::Conflict => CONFLICT_CODE,
        ErrorKind::Unauthorized => UNAUTHORIZED_CODE,
    }
}

fn kind_from_code(code: i32) -> Option<ErrorKind> {
    match code {
        INVALID_ARGUMENT_CODE => Some(ErrorKind::InvalidArgument),
        NOT_FOUND_CODE => Some(ErrorKind::NotFound),
        INVALID_STATE_CODE => Some(ErrorKind::InvalidState),
        CONFLICT_CODE => Some(ErrorKind::Conflict),
        UNAUTHORIZED_CODE => Some(ErrorKind::Unauthorized),
        _ => None,
    }
}

/// Wraps a ledger failure into a JSON-RPC error object carrying its kind as
/// both the code and `data.kind`.
pub fn into_rpc_error(err: LedgerError) -> Error {
    let kind = err.kind();
    let object = ErrorObject::owned(
        error_code(kind),
        err.to_string(),
        Some(json!({ "kind": kind.to_string() })),
    );

    Error::Call(CallError::Custom(object))
}

/// Recovers the ledger failure kind from an error a client received, if it
/// was produced by the ledger at all.
pub fn error_kind(err: &Error) -> Option<ErrorKind> {
    match err {
        Error::Call(CallError::Custom(object)) => kind_from_code(object.code()),
        _ => None,
    }
}
