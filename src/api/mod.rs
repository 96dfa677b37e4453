mod error;
pub mod models;
mod server;
pub mod services;
pub mod state;

pub use error::{ApiError, Endpoint};
pub use server::{router, run};
pub use state::AppState;
