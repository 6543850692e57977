//! Dispatcher de jobs: resolución, ejecución por etapas, export y
//! traducción de errores al contrato uniforme `DispatchOutcome`.

pub mod dispatcher;
pub mod outcome;
pub mod translate;

pub use dispatcher::Dispatcher;
pub use outcome::DispatchOutcome;
pub use translate::translate;
