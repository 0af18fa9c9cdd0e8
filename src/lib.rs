// src/lib.rs
pub mod api;
pub mod banner;
pub mod cli;
pub mod config;
pub mod conjure;
pub mod errors;
pub mod models;
pub mod runner;
pub mod solutions;
pub mod tls;
pub mod validator;
