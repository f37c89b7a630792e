pub mod app;
pub mod panels;
pub mod shell;

pub use app::{DesktopGuiApp, StartupConfig};
