//! Query normalization and per-category page cursors.

use crate::work::{Page, Work};

/// Normalizes query text with `application/x-www-form-urlencoded` rules
/// (space becomes `+`, reserved bytes are percent-encoded).
///
/// Two queries are the same search iff their encoded forms are equal.
#[must_use]
pub fn encode_query(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// The current query and the last successfully fetched page per category.
///
/// A cursor of 0 means nothing has been fetched yet for the current query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Query text as typed.
    text: String,
    /// Normalized (encoded) form of `text`.
    encoded: String,
    /// Movie page cursor.
    movie_page: u32,
    /// TV show page cursor.
    tv_show_page: u32,
}

impl QueryState {
    /// Switches to `text`, resetting both cursors if its normalized form
    /// differs from the current one. Returns `true` on reset.
    pub fn update(&mut self, text: &str) -> bool {
        let encoded = encode_query(text);
        let changed = encoded != self.encoded;
        if changed {
            self.movie_page = 0;
            self.tv_show_page = 0;
        }
        self.text = String::from(text);
        self.encoded = encoded;
        changed
    }

    /// Query text as typed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized query text.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Last fetched movie page.
    #[must_use]
    pub const fn movie_page(&self) -> u32 {
        self.movie_page
    }

    /// Last fetched TV show page.
    #[must_use]
    pub const fn tv_show_page(&self) -> u32 {
        self.tv_show_page
    }

    /// Page to request for the next movie fetch.
    #[must_use]
    pub const fn next_movie_page(&self) -> u32 {
        self.movie_page.saturating_add(1)
    }

    /// Page to request for the next TV show fetch.
    #[must_use]
    pub const fn next_tv_show_page(&self) -> u32 {
        self.tv_show_page.saturating_add(1)
    }

    /// Applies a fetched movie page: a valid page advances the cursor and
    /// yields its works; an invalid one yields `None`.
    pub fn accept_movie_page<T: Into<Work>>(&mut self, page: Page<T>) -> Option<Vec<Work>> {
        accept(&mut self.movie_page, page)
    }

    /// Applies a fetched TV show page. See [`Self::accept_movie_page`].
    pub fn accept_tv_show_page<T: Into<Work>>(&mut self, page: Page<T>) -> Option<Vec<Work>> {
        accept(&mut self.tv_show_page, page)
    }
}

fn accept<T: Into<Work>>(cursor: &mut u32, page: Page<T>) -> Option<Vec<Work>> {
    if !page.is_valid() {
        return None;
    }
    *cursor = page.page;
    Some(page.works.into_iter().map(Into::into).collect())
}
