//! View-state engine for the atlas page.
//!
//! `ViewState` owns the catalog, the era/focus filters, and the active
//! project. The render surfaces (card grid, timeline, map markers, detail
//! panel) are pure snapshot extractors over that state; they never read
//! ambient globals, so a surface can be rebuilt at any time from the state
//! alone.

pub mod detail;
pub mod grid;
pub mod markers;
pub mod state;
pub mod timeline;

pub use state::{FilterChoice, FilterState, FlyTo, ViewState};
