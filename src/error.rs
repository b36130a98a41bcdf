// Crate error type. Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the demo window failed
    WindowUpdate(String), // Pushing a frame to the demo window failed
    BufferSize(String),   // Raw pixel data does not match the stated dimensions
    Config(String),       // Reading or parsing the effect configuration failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::BufferSize(s) => write!(f, "Buffer size error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
