// src/api/handlers/mod.rs
mod assets;
mod convert;

pub use assets::{resolve_asset, serve_asset};
pub use convert::convert;
