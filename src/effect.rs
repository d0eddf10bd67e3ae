use crate::action::Action;
use crate::api;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadCatalog,
    LoadDetail { name: String },
}

/// Executes one effect and returns the completion action to feed back into
/// the reducer. Callers decide scheduling; nothing here is cancellable, an
/// abandoned result is simply dropped.
pub async fn run(effect: Effect) -> Action {
    match effect {
        Effect::LoadCatalog => match api::fetch_catalog().await {
            Ok(entries) => Action::CatalogDidLoad(entries),
            Err(err) => Action::CatalogDidError(err.to_string()),
        },
        Effect::LoadDetail { name } => match api::fetch_pokemon_profile(&name).await {
            Ok(detail) => Action::DetailDidLoad(detail),
            Err(err) => Action::DetailDidError {
                name,
                error: err.to_string(),
            },
        },
    }
}
