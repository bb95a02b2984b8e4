pub mod renderers;
pub mod view_models;

pub use renderers::{render_bookmarks, render_entries, render_gc};
pub use view_models::{BookmarkView, EntryView, GcView};
