pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn fetch() -> LogCtx<ops::fetch::Fetch> { LogCtx::new(config::logs_are_json()) }
pub fn render() -> LogCtx<ops::render::Render> { LogCtx::new(config::logs_are_json()) }
pub fn session() -> LogCtx<ops::session::Session> { LogCtx::new(config::logs_are_json()) }
pub fn categories() -> LogCtx<ops::categories::Categories> { LogCtx::new(config::logs_are_json()) }
