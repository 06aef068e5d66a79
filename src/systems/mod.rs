mod core;
mod input;
mod ui;

pub use self::core::*;
pub use self::input::*;
pub use self::ui::*;
