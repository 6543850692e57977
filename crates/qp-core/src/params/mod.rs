//! Parámetros de un job: tabla de ruteo + tabla de literales, y su
//! resolución a valores tipados listos para invocar una acción.
pub mod resolver;
pub mod routing;
pub mod value;

pub use resolver::ParameterResolver;
pub use routing::{JobParameters, LiteralTable, LiteralValue, ParamRoute, RoutingTable};
pub use value::{summarize, ResolvedParams, ResolvedValue};
