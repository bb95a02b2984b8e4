use super::HandlerContext;
use crate::presentation::{BookmarkView, render_bookmarks};
use anyhow::Result;
use std::io;

pub fn list(ctx: &HandlerContext) -> Result<()> {
    let views: Vec<BookmarkView> = ctx
        .bookmarks()
        .list()?
        .into_iter()
        .map(BookmarkView::from)
        .collect();

    render_bookmarks(&mut io::stdout().lock(), &views, ctx.format)?;
    Ok(())
}

pub fn remove(ctx: &HandlerContext, names: &[String]) -> Result<()> {
    let store = ctx.bookmarks();
    for name in names {
        if store.remove(name)? {
            tracing::info!(name = %name, "bookmark removed");
        }
    }
    Ok(())
}
