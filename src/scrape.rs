// src/scrape.rs
//
// The external collaborator seam. The runner only sees the Scraper trait;
// HttpScraper is the reference implementation that reads a store-details
// page and confirms the listed fields against it.

use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::config::consts::HOST;
use crate::core::{html, net, sanitize};
use crate::store::Store;

/// Fields confirmed from the live store page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDetails {
    pub name: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub slug: Option<String>,
}

pub trait Scraper: Sync {
    fn scrape(&self, store: &Store) -> Result<StoreDetails, Box<dyn Error>>;
}

pub struct HttpScraper;

impl Scraper for HttpScraper {
    fn scrape(&self, store: &Store) -> Result<StoreDetails, Box<dyn Error>> {
        let doc = net::http_get(HOST, &store.details_path())?;
        Ok(extract_details(&doc, store))
    }
}

/// Pull name/address fields out of a store-details page. Anything the page
/// doesn't yield falls back to the listed store record.
pub fn extract_details(doc: &str, store: &Store) -> StoreDetails {
    let heading = html::slice_between_ci(doc, "<h1", "</h1>")
        .or_else(|| html::slice_between_ci(doc, "<title", "</title>"))
        .map(|inner| html::strip_tags(sanitize::normalize_entities(inner)))
        .filter(|t| !t.is_empty());

    let address = html::slice_between_ci(doc, "<address", "</address>")
        .map(|inner| html::strip_tags(sanitize::normalize_entities(inner)));

    let postal_code = address
        .as_deref()
        .and_then(sanitize::find_postal_code)
        .or_else(|| store.postal_code.clone());

    let (city, province) = address
        .as_deref()
        .and_then(find_city_province)
        .map(|(c, p)| (Some(c), Some(p)))
        .unwrap_or((store.city.clone(), store.province.clone()));

    let name = heading.or_else(|| store.name.clone());
    let slug = name
        .as_deref()
        .map(sanitize::slugify)
        .filter(|s| !s.is_empty())
        .or_else(|| store.slug.clone());

    StoreDetails { name, city, province, postal_code, slug }
}

/// "… 123 Main St, Ottawa, ON K1A 0B1 …" → ("Ottawa", "ON").
/// Looks for the last "<word>, <two letters>" pair in the text.
fn find_city_province(text: &str) -> Option<(String, String)> {
    let mut found = None;
    let bytes = text.as_bytes();
    let mut i = 0;
    while let Some(rel) = text[i..].find(", ") {
        let comma = i + rel;
        let after = comma + 2;
        if after + 2 <= text.len()
            && bytes[after].is_ascii_alphabetic()
            && bytes[after + 1].is_ascii_alphabetic()
            && text[after + 2..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_ascii_alphanumeric())
        {
            let city = text[..comma]
                .rsplit(|c: char| c.is_ascii_digit() || c == ',')
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            if !city.is_empty() {
                found = Some((city, text[after..after + 2].to_ascii_uppercase()));
            }
        }
        i = after;
    }
    found
}
