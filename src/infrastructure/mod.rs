//! Infrastructure layer - adapters and use case implementations

pub mod logging;
pub mod storage;
pub mod user;
