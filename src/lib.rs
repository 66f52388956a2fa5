pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod grading;
pub mod models;
pub mod services;

pub use client::{ClassroomApi, HttpClassroomApi};
pub use config::ClientConfig;
pub use error::AppError;
