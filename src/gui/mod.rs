pub mod app;
pub mod gauge;
pub mod theme;
pub mod window;
