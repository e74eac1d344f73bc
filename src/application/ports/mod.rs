// src/application/ports/mod.rs
pub mod markup;
pub mod time;
pub mod util;
