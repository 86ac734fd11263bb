//! UI layer for the desktop GUI: screens, dashboard shell, panels, widgets and theme.

pub mod app;
pub mod landing;
pub mod loading_screen;
pub mod panels;
pub mod shell;
pub mod theme;
pub mod widgets;

pub use app::Synth3sisApp;
