use serde::{Deserialize, Serialize};

use crate::state::{PokemonDetail, PokemonSummary, SortKey};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    CatalogFetch,
    CatalogDidLoad(Vec<PokemonSummary>),
    CatalogDidError(String),

    QuerySet(String),
    SortSet(SortKey),
    RevealMore(usize),

    DetailFetch { name: String },
    DetailDidLoad(PokemonDetail),
    DetailDidError { name: String, error: String },
    DetailClose,
}
