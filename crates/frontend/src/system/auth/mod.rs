pub mod access;
pub mod api;
pub mod context;
pub mod guard;
pub mod session;
pub mod storage;
