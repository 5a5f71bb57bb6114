//! Interactive front end for the task tracker: configuration, storage and the session loop.
pub mod config;
pub mod session;
pub mod storage;
pub mod ui;
