//! HTTP request handlers.

pub mod certificate_handler;
pub mod certification_handler;
pub mod organization_handler;
pub mod user_handler;

pub use certificate_handler::certificate_routes;
pub use certification_handler::certification_routes;
pub use organization_handler::organization_routes;
pub use user_handler::user_routes;
