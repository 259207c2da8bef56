// src/store.rs
//
// The store list is local and versioned; enumerating stores never touches
// the network. Loading normalizes each record (slug + details URL) so the
// rest of the pipeline can rely on both being present.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::config::consts::{HOST, STORE_DETAILS_PREFIX};
use crate::core::sanitize::slugify;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(alias = "storeId")]
    pub store_number: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(rename = "postalCode", default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Store {
    /// "store-id-city-province", falling back to any listed slug,
    /// then "store-<id>".
    pub fn build_slug(&self) -> String {
        let mut parts = vec![self.store_number.trim().to_string()];
        if let Some(city) = &self.city {
            parts.push(slugify(city));
        }
        if let Some(province) = &self.province {
            parts.push(slugify(province));
        }
        let computed: String = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        if !computed.trim_matches('-').is_empty() {
            return computed;
        }
        if let Some(slug) = &self.slug {
            if !slug.is_empty() {
                return slug.clone();
            }
        }
        format!("store-{}", self.store_number)
    }

    pub fn details_path(&self) -> String {
        join!(STORE_DETAILS_PREFIX, &self.store_number)
    }

    /// One-line label for progress output: "[STORE 7004] Ottawa, ON"
    pub fn label(&self) -> String {
        let location = [self.city.as_deref(), self.province.as_deref()]
            .iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let display = if !location.is_empty() {
            location
        } else {
            self.name
                .clone()
                .unwrap_or_else(|| format!("Store {}", self.store_number))
        };
        format!("[STORE {}] {}", self.store_number, display)
    }

    fn normalize(&mut self) {
        self.slug = Some(self.build_slug());
        if self.url.is_none() {
            self.url = Some(join!("https://", HOST, &self.details_path()));
        }
    }
}

/// Load and normalize the full ordered store list.
pub fn load_list(path: &Path) -> Result<Vec<Store>> {
    let text = fs::read_to_string(path)?;
    let mut stores: Vec<Store> = serde_json::from_str(&text)?;
    for store in &mut stores {
        store.normalize();
    }
    Ok(stores)
}
