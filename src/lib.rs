//! Taskpad - a terminal todo list with filters and inline editing.

pub mod controller;
pub mod logging;
pub mod models;
pub mod storage;
pub mod store;
pub mod tui;
