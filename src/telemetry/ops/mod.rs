pub mod fetch;
pub mod render;
pub mod session;
pub mod categories;
