pub mod color;
pub mod fonts;
pub mod gui;
pub mod hotkey;
pub mod loader;
pub mod logging;
pub mod screen;
pub mod settings;
pub mod surface;
pub mod visibility;
pub mod window;
