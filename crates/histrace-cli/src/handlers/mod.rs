pub mod bookmark;
pub mod bookmarks;
pub mod exec;
pub mod gc;
pub mod show;
pub mod tee;
pub mod trace;

use crate::args::OutputFormat;
use histrace_core::Environment;
use histrace_runtime::BookmarkStore;

pub struct HandlerContext {
    pub env: Environment,
    pub format: OutputFormat,
}

impl HandlerContext {
    pub fn new(env: Environment, format: OutputFormat) -> Self {
        Self { env, format }
    }

    pub fn bookmarks(&self) -> BookmarkStore {
        BookmarkStore::new(self.env.bookmarks_dir())
    }
}
