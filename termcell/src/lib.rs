pub mod buffer;
pub mod color;
pub mod event;
pub mod geometry;
pub mod input;
pub mod style;
pub mod terminal;
pub mod text;

pub use buffer::{Buffer, Cell};
pub use color::{Color, Rgb};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use geometry::Rect;
pub use input::{InputEdit, InputState};
pub use style::{Style, TextStyle};
pub use terminal::Terminal;
pub use text::{align_offset, char_width, display_width, truncate_to_width, TextAlign};
