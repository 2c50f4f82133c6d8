//! skinedit - undo/redo transaction core for a UI skin editor
//!
//! This library exposes the skin model, the reversible edit commands and
//! their histories for the editor front-end and for scripted replay.

pub mod command;
pub mod config;
pub mod editor;
pub mod history;
pub mod model;
pub mod replay;
pub mod scene;
