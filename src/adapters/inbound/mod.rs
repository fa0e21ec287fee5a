mod api_server;

pub use api_server::{ApiServer, ApiState, RegisterRequest};
