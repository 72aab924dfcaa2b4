//! API and background task tests

mod health_tests;
mod hook_tests;
mod invite_tests;
mod task_tests;
