

pub mod server;

pub use server::{AppState, HealthResponse, SearchParams, create_router, serve};
