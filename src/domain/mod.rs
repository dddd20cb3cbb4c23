pub mod alerts;
pub mod auth;
pub mod forecast;
pub mod weather;
