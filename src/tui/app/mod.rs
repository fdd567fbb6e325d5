mod menu;
mod state;

pub use state::{AppState, InputAction, Scene, DRAG_THRESHOLD_COLS, PX_PER_COL, PX_PER_ROW};
