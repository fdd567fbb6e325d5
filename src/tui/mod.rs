//! Terminal front end: a thin presentation layer over [`crate::reading::Reading`].

pub mod app;
pub mod controller;
pub mod ui;
