//! # Salesboard Session
//!
//! A session couples one immutable `RecordStore` with the user's current
//! category/sub-category selection. Every input event is handled explicitly
//! and re-runs the filter, aggregate and metrics pipeline, returning a fresh
//! view for the presentation layer to render.

pub mod error;
pub mod event;
pub mod selection;
pub mod state;
pub mod view;

pub use error::SessionError;
pub use event::SessionEvent;
pub use selection::{Selection, SelectionPhase};
pub use state::Session;
pub use view::{NO_CATEGORY_PROMPT, NO_SELECTION_PROMPT, Overview, SelectionReport, SelectionView};
