//! Built-in widgets: Label, Button, Slider, TextField.

pub mod button;
pub mod label;
pub mod slider;
pub mod text_field;

pub use button::Button;
pub use label::{Label, SharedText};
pub use slider::Slider;
pub use text_field::TextField;
