pub mod autoplay;
pub mod runtime;
