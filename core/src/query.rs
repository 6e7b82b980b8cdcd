//! Query-string construction for the listing endpoint.
//!
//! # Design
//! The backend reads `page` and `limit` on every list call and treats
//! `search`, `filter_type` and `sort_uf` as optional. `ListingQuery` models
//! the optional ones as `Option<String>` and `QueryString` keeps insertion
//! order, so the emitted order is always `page, limit, search, filter_type,
//! sort_uf`.
//!
//! An empty string counts as "not provided": the web frontend never sent an
//! empty `search=` and the backend would read it as a filter that matches
//! everything anyway.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Fixed page size sent as `limit` on every list request.
pub const PAGE_SIZE: u32 = 10;

/// Filter value meaning "all modalidades".
pub const DEFAULT_FILTER_TYPE: &str = "todas";

/// RFC 3986 unreserved characters pass through, everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// What a browser escapes in a query before sending it. `&` and `=` stay raw.
const BROWSER_QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// What a browser escapes in a path segment.
const BROWSER_PATH: &AsciiSet = &BROWSER_QUERY
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// How parameter values and path segments are written into a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryEncoding {
    /// Percent-encode everything outside the unreserved set.
    #[default]
    Percent,
    /// Concatenate values the way the original browser client did: only
    /// what the browser's URL parser escapes (controls, space, `"`, `#`,
    /// `<`, `>`, non-ASCII) is encoded. A value containing `&` or `=`
    /// changes the meaning of the query.
    Verbatim,
}

impl QueryEncoding {
    /// Encode a query parameter value.
    pub fn encode<'a>(&self, component: &'a str) -> Cow<'a, str> {
        match self {
            QueryEncoding::Percent => utf8_percent_encode(component, COMPONENT).into(),
            QueryEncoding::Verbatim => utf8_percent_encode(component, BROWSER_QUERY).into(),
        }
    }

    /// Encode a single path segment.
    pub fn encode_segment<'a>(&self, segment: &'a str) -> Cow<'a, str> {
        match self {
            QueryEncoding::Percent => utf8_percent_encode(segment, COMPONENT).into(),
            QueryEncoding::Verbatim => utf8_percent_encode(segment, BROWSER_PATH).into(),
        }
    }
}

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Push `key` only when `value` is present and non-empty.
    pub fn push_present(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(key, _)| *key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render as `k=v&k=v` without the leading `?`.
    pub fn encode(&self, encoding: QueryEncoding) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", encoding.encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Parameters of the paginated operadoras listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingQuery {
    /// 1-based page number. Not validated; the backend decides what 0 means.
    pub page: u32,
    pub search: Option<String>,
    pub filter_type: Option<String>,
    pub sort_uf: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            filter_type: Some(DEFAULT_FILTER_TYPE.to_string()),
            sort_uf: None,
        }
    }
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the positional shape the web frontend used:
    /// `listar(page, search, filter_type, sort_uf)`.
    pub fn from_parts(page: u32, search: &str, filter_type: &str, sort_uf: Option<&str>) -> Self {
        Self {
            page,
            search: Some(search.to_string()),
            filter_type: Some(filter_type.to_string()),
            sort_uf: sort_uf.map(str::to_string),
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter_type(mut self, filter_type: impl Into<String>) -> Self {
        self.filter_type = Some(filter_type.into());
        self
    }

    /// Drop `filter_type` so the backend applies its own default.
    pub fn without_filter_type(mut self) -> Self {
        self.filter_type = None;
        self
    }

    pub fn with_sort_uf(mut self, uf: impl Into<String>) -> Self {
        self.sort_uf = Some(uf.into());
        self
    }

    pub fn to_query_string(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .push("page", self.page)
            .push("limit", PAGE_SIZE)
            .push_present("search", self.search.as_deref())
            .push_present("filter_type", self.filter_type.as_deref())
            .push_present("sort_uf", self.sort_uf.as_deref());
        query
    }
}
