pub mod interaction;
pub mod touch;

pub use interaction::{Button, DragSource, Interaction, Phase};
pub use touch::TouchState;
