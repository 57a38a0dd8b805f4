//! External tool services.

pub mod ffprobe;
