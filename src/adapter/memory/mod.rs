//! 内存后端模块

mod adapter;
mod operations;
mod utils;

pub use adapter::InMemoryBackend;
