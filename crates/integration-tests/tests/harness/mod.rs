#![allow(dead_code)]

pub mod app;
pub mod logs;
pub mod server;
