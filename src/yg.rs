//! Main module for yg library functionality

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod testing;
