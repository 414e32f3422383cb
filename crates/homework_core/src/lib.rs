pub mod calendar;
pub mod config;
pub mod error;
pub mod model;
pub mod sort;
pub mod storage;
pub mod task_api;
