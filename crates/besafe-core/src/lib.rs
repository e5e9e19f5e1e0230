pub mod auth;
pub mod model;
pub mod projection;
pub mod viewer;
