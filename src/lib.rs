pub mod config;
pub mod constants;
pub mod logging;
pub mod mastery;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
