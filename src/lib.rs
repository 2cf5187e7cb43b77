#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod app;
pub mod game;
pub mod score;
pub mod ui;
