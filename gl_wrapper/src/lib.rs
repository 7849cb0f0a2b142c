pub mod context;
pub mod error;
pub mod geometry;
pub mod program;
pub mod recording;
