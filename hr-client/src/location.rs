//! `(page, search)` ⇄ URL query string
//!
//! `page` is omitted when it is 1 and `search` when it is empty, so the first
//! unfiltered page of a list is just its bare route.

use url::form_urlencoded;

/// List state carried in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLocation {
    pub page: u32,
    pub search: String,
}

impl Default for ListLocation {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
        }
    }
}

pub fn encode(route: &str, page: u32, search: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut empty = true;
    if page > 1 {
        query.append_pair("page", &page.to_string());
        empty = false;
    }
    if !search.is_empty() {
        query.append_pair("search", search);
        empty = false;
    }
    if empty {
        route.to_string()
    } else {
        format!("{}?{}", route, query.finish())
    }
}

/// Missing or malformed `page` reads as 1, missing `search` as empty.
pub fn decode(url: &str) -> ListLocation {
    let url = strip_fragment(url);
    let mut location = ListLocation::default();
    let Some((_, query)) = url.split_once('?') else {
        return location;
    };
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "page" => location.page = value.parse().ok().filter(|p| *p >= 1).unwrap_or(1),
            "search" => location.search = value.into_owned(),
            _ => {}
        }
    }
    location
}

/// Path component of a location.
pub fn route_of(url: &str) -> &str {
    let url = strip_fragment(url);
    url.split_once('?').map_or(url, |(path, _)| path)
}

fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(head, _)| head)
}
