pub mod mac;
pub mod response;

pub use mac::{InvalidAddress, MacAddress};
pub use response::{ActionResult, ErrorResponse, HealthResponse, StatusResponse};
