//! Error handling and exit codes.

use fibdrv_core::calculator::FibError;
use fibdrv_core::constants::exit_codes;
use fibdrv_service::session::SessionError;

/// Map a calculation error to its exit code.
pub fn handle_error(err: &FibError) -> i32 {
    match err {
        FibError::Allocation(_)
        | FibError::InvalidDigit { .. }
        | FibError::Empty
        | FibError::Underflow => exit_codes::ERROR_GENERIC,
        FibError::CapacityExceeded { .. } => exit_codes::ERROR_CAPACITY,
        FibError::Config(_) => exit_codes::ERROR_CONFIG,
        FibError::Cancelled => exit_codes::ERROR_CANCELED,
        FibError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
        FibError::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
    }
}

/// Exit code for an application error, looking through the anyhow chain.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .chain()
        .find_map(|cause| {
            if let Some(e) = cause.downcast_ref::<FibError>() {
                return Some(handle_error(e));
            }
            match cause.downcast_ref::<SessionError>() {
                Some(SessionError::Fib(e)) => Some(handle_error(e)),
                Some(_) => Some(exit_codes::ERROR_GENERIC),
                None => None,
            }
        })
        .unwrap_or(exit_codes::ERROR_GENERIC);
    u8::try_from(code).unwrap_or(1)
}
