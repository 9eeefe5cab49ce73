//! Collection reads for the catalog.
//!
//! A catalog read is either a bulk lookup by product id, a free-text search over
//! name and description, or a plain paged listing. See
//! [`CatalogQuery::from_parts`] for how a raw `(ids, text, page)` request picks one.

use crate::model::Page;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogQuery {
    /// Products whose id is in the set. Not paged; unknown ids are absent from the result.
    ByIds(BTreeSet<String>),
    /// Case-insensitive substring match on name or description. `needle` is lowercase.
    Search { needle: String, page: Page },
    /// Every product.
    List(Page),
}

impl CatalogQuery {
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CatalogQuery::ByIds(ids.into_iter().map(Into::into).collect())
    }

    pub fn search(text: &str, page: Page) -> Self {
        CatalogQuery::Search {
            needle: text.trim().to_lowercase(),
            page,
        }
    }

    /// A non-blank `text` wins over `ids`; with neither, every product is listed.
    pub fn from_parts(ids: Vec<String>, text: &str, page: Page) -> Self {
        if !text.trim().is_empty() {
            CatalogQuery::search(text, page)
        } else if !ids.is_empty() {
            CatalogQuery::by_ids(ids)
        } else {
            CatalogQuery::List(page)
        }
    }
}
