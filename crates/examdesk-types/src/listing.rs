use serde::{Deserialize, Serialize};

/// List payload from the backend: either a bare array or a paginated envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Page { results: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Page { results: items } => items,
        }
    }
}
