// HTTP Server modules
pub mod handlers;
pub mod models;
pub mod registry;
pub mod reject;
pub mod routes;

// Message store client library
pub mod store;
