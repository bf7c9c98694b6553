#![warn(clippy::all, clippy::pedantic)]

pub mod highscore_tests;
pub mod integration_tests;
pub mod modes_tests;
pub mod ui_tests;
