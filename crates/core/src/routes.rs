//! Client-visible routes.
//!
//! The list lives at `/` and takes an optional `page` query parameter. A doctor's detail page
//! lives at `/doctor/{id}` and carries the list page it was opened from, so "back to list" lands
//! on the same page.

use crate::{DirectoryError, DirectoryResult};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;

const DETAIL_PREFIX: &str = "/doctor/";

/// Routes are resolved against this origin so `Url` can split path and query.
const ROUTE_ORIGIN: &str = "http://directory.local/";

/// Everything except the RFC 3986 unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRoute {
    pub page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRoute {
    pub id: String,
    pub page: Option<usize>,
}

impl ListRoute {
    pub fn path(&self) -> String {
        match self.page {
            Some(page) => format!("/?page={page}"),
            None => "/".into(),
        }
    }
}

impl DetailRoute {
    pub fn path(&self) -> String {
        let mut path = format!("{DETAIL_PREFIX}{}", utf8_percent_encode(&self.id, SEGMENT));
        if let Some(page) = self.page {
            path.push_str(&format!("?page={page}"));
        }
        path
    }

    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidInput` if the path is not a detail route or the id is
    /// empty or not UTF-8 once decoded, or `DirectoryError::InvalidPage` for a bad `page`.
    pub fn parse(route: &str) -> DirectoryResult<Self> {
        let not_detail = || DirectoryError::InvalidInput(format!("not a detail route: {route}"));
        let url = Url::parse(ROUTE_ORIGIN)
            .and_then(|origin| origin.join(route))
            .map_err(|_| not_detail())?;

        let raw_id = url
            .path()
            .strip_prefix(DETAIL_PREFIX)
            .filter(|id| !id.is_empty() && !id.contains('/'))
            .ok_or_else(not_detail)?;
        let id = percent_decode_str(raw_id)
            .decode_utf8()
            .map_err(|_| DirectoryError::InvalidInput(format!("badly encoded id: {raw_id}")))?;

        let page = url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| parse_page(&value))
            .transpose()?;

        Ok(Self {
            id: id.into_owned(),
            page,
        })
    }

    /// Where "back to list" goes.
    pub fn back(&self) -> ListRoute {
        ListRoute { page: self.page }
    }
}

/// Parses a `page` value. Pages are 1-based.
///
/// # Errors
///
/// Returns `DirectoryError::InvalidPage` unless `raw` is a positive integer.
pub fn parse_page(raw: &str) -> DirectoryResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(DirectoryError::InvalidPage(format!(
            "expected a positive integer, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_route_renders_page() {
        assert_eq!(ListRoute { page: None }.path(), "/");
        assert_eq!(ListRoute { page: Some(3) }.path(), "/?page=3");
    }

    #[test]
    fn page_values_are_positive() {
        assert_eq!(parse_page(" 4 ").unwrap(), 4);
        match parse_page("0") {
            Err(DirectoryError::InvalidPage(_)) => {}
            other => panic!("expected InvalidPage error, got {other:?}"),
        }
        assert!(parse_page("two").is_err());
    }

    #[test]
    fn detail_route_round_trip() {
        let route = DetailRoute {
            id: "42".into(),
            page: Some(2),
        };
        assert_eq!(route.path(), "/doctor/42?page=2");
        assert_eq!(DetailRoute::parse(&route.path()).unwrap(), route);
        assert_eq!(route.back().path(), "/?page=2");
    }

    #[test]
    fn detail_route_reads_page_among_other_params() {
        let route = DetailRoute::parse("/doctor/7?sort=name&page=3").unwrap();
        assert_eq!(route.id, "7");
        assert_eq!(route.page, Some(3));

        match DetailRoute::parse("/doctor/7?page=0") {
            Err(DirectoryError::InvalidPage(_)) => {}
            other => panic!("expected InvalidPage error, got {other:?}"),
        }
    }

    #[test]
    fn detail_route_encodes_awkward_ids() {
        let route = DetailRoute {
            id: "a b/ç".into(),
            page: None,
        };
        assert_eq!(route.path(), "/doctor/a%20b%2F%C3%A7");
        assert_eq!(DetailRoute::parse(&route.path()).unwrap(), route);
    }

    #[test]
    fn detail_route_rejects_other_paths() {
        assert!(DetailRoute::parse("/doctor/").is_err());
        assert!(DetailRoute::parse("/doctors/1").is_err());
        assert!(DetailRoute::parse("/doctor/1/extra").is_err());
        assert!(DetailRoute::parse("/?page=2").is_err());
        match DetailRoute::parse("/doctor/%FF") {
            Err(DirectoryError::InvalidInput(msg)) => assert!(msg.contains("badly encoded")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }
}
