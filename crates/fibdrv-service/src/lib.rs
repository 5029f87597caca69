//! # fibdrv-service
//!
//! The layer between callers and the arithmetic core: parallel batch
//! execution, verification against an independent binary reference, and the
//! exclusive seek-and-read session the character-device driver exposed.

pub mod interfaces;
pub mod orchestrator;
pub mod reference;
pub mod session;

pub use interfaces::{CalculationResult, ResultPresenter};
pub use orchestrator::{execute_batch, execute_batch_with_observer, verify_results};
pub use session::{FibDevice, Session, SessionError, Whence};
