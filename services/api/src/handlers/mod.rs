//! HTTP handlers

mod auth;
mod health;
mod jobs;

pub use auth::{callback, login, logout, me};
pub use health::{health, ready};
pub use jobs::{apply_to_job, create_job, delete_job, get_job, list_jobs};
