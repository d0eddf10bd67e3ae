//! Reducer - the single state-transition function: (state, action) -> effects

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reduce(state: &mut AppState, action: Action) -> Vec<Effect> {
    match action {
        Action::CatalogFetch => {
            state.catalog_loading = true;
            state.message = None;
            vec![Effect::LoadCatalog]
        }

        Action::CatalogDidLoad(entries) => {
            state.catalog_loading = false;
            state.all = entries;
            state.rebuild_visible();
            Vec::new()
        }

        Action::CatalogDidError(error) => {
            state.catalog_loading = false;
            state.message = Some(format!("Catalog error: {error}"));
            Vec::new()
        }

        Action::QuerySet(query) => {
            state.query = query;
            state.rebuild_visible();
            Vec::new()
        }

        Action::SortSet(key) => {
            state.sort_key = key;
            state.rebuild_visible();
            Vec::new()
        }

        Action::RevealMore(n) => {
            state.reveal_more(n);
            Vec::new()
        }

        Action::DetailFetch { name } => {
            state.detail_loading = true;
            state.detail = None;
            state.message = None;
            vec![Effect::LoadDetail { name }]
        }

        Action::DetailDidLoad(detail) => {
            state.detail_loading = false;
            state.detail = Some(detail);
            Vec::new()
        }

        Action::DetailDidError { name, error } => {
            state.detail_loading = false;
            state.message = Some(format!("{name}: {error}"));
            Vec::new()
        }

        Action::DetailClose => {
            state.detail = None;
            Vec::new()
        }
    }
}
