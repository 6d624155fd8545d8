//! Server middleware.

pub mod request_id;
