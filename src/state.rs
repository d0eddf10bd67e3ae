use serde::{Deserialize, Serialize};

/// Reveal cursor after a fresh catalog load, and the step added per
/// "load more" request.
pub const REVEAL_STEP: usize = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub id: u16,
    pub weight: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    #[default]
    IdAsc,
    IdDesc,
    WeightAsc,
    WeightDesc,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub value: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityInfo {
    pub name: String,
    pub effect: String,
}

/// One node of the flattened evolution tree. `depth` is 0 for the chain
/// root and parent depth + 1 for every child, in depth-first child order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub name: String,
    pub image_url: String,
    pub depth: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailImages {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub showdown_front_default: Option<String>,
    pub showdown_front_shiny: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u16,
    pub name: String,
    pub types: Vec<String>,
    pub images: DetailImages,
    pub description: String,
    pub abilities: Vec<AbilityInfo>,
    pub stats: Vec<StatValue>,
    pub evolution: Vec<EvolutionStage>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub all: Vec<PokemonSummary>,
    pub visible: Vec<PokemonSummary>,
    pub query: String,
    pub sort_key: SortKey,
    pub revealed: usize,
    pub catalog_loading: bool,
    pub detail_loading: bool,
    pub detail: Option<PokemonDetail>,
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            sort_key: SortKey::default(),
            revealed: REVEAL_STEP,
            catalog_loading: false,
            detail_loading: false,
            detail: None,
            message: None,
        }
    }
}

impl AppState {
    /// Recomputes `visible` from `(all, query, sort_key)` in one step.
    /// Filter and sort always run together.
    pub fn rebuild_visible(&mut self) {
        self.visible = compute_visible(&self.all, &self.query, self.sort_key);
    }

    /// `revealed` is monotonic within a session and is not reset when the
    /// query or sort key changes, so it can point past the end of a freshly
    /// shrunk `visible`. Clamp here rather than at every mutation site.
    pub fn visible_slice(&self) -> &[PokemonSummary] {
        let end = self.revealed.min(self.visible.len());
        &self.visible[..end]
    }

    pub fn reveal_more(&mut self, n: usize) {
        self.revealed = (self.revealed + n).min(self.visible.len());
    }
}

/// Filter by case-insensitive substring match on name, then stable-sort by
/// the key's comparator. Pure; callers own when it runs.
pub fn compute_visible(
    all: &[PokemonSummary],
    query: &str,
    sort_key: SortKey,
) -> Vec<PokemonSummary> {
    let query = query.to_lowercase();
    let mut visible: Vec<PokemonSummary> = all
        .iter()
        .filter(|entry| query.is_empty() || entry.name.to_lowercase().contains(&query))
        .cloned()
        .collect();

    match sort_key {
        SortKey::NameAsc => visible.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NameDesc => visible.sort_by(|a, b| b.name.cmp(&a.name)),
        SortKey::IdAsc => visible.sort_by_key(|entry| entry.id),
        SortKey::IdDesc => visible.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::WeightAsc => visible.sort_by_key(|entry| entry.weight),
        SortKey::WeightDesc => visible.sort_by(|a, b| b.weight.cmp(&a.weight)),
    }
    visible
}

/// Formats an API identifier for display: "mr-mime" -> "Mr Mime".
pub fn display_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(name: &str, id: u16, weight: u32) -> PokemonSummary {
        PokemonSummary {
            name: name.to_string(),
            id,
            weight,
        }
    }

    fn starters() -> Vec<PokemonSummary> {
        vec![
            summary("bulbasaur", 1, 69),
            summary("charmander", 4, 85),
            summary("squirtle", 7, 90),
            summary("charmeleon", 5, 190),
            summary("charizard", 6, 905),
        ]
    }

    #[test]
    fn empty_query_keeps_every_entry() {
        let all = starters();
        let visible = compute_visible(&all, "", SortKey::IdAsc);
        assert_eq!(visible.len(), all.len());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let all = starters();
        let visible = compute_visible(&all, "CHAR", SortKey::IdAsc);
        let names: Vec<&str> = visible.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["charmander", "charmeleon", "charizard"]);
    }

    #[test]
    fn char_search_orders_by_ascending_id() {
        let all = starters();
        let visible = compute_visible(&all, "char", SortKey::IdAsc);
        let ids: Vec<u16> = visible.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
    }

    #[test]
    fn every_sort_key_yields_total_order() {
        let all = starters();
        for key in [
            SortKey::NameAsc,
            SortKey::NameDesc,
            SortKey::IdAsc,
            SortKey::IdDesc,
            SortKey::WeightAsc,
            SortKey::WeightDesc,
        ] {
            let once = compute_visible(&all, "", key);
            let twice = compute_visible(&once, "", key);
            assert_eq!(once, twice, "resorting with {key:?} must be a fixed point");
        }

        let by_name = compute_visible(&all, "", SortKey::NameAsc);
        assert_eq!(by_name[0].name, "bulbasaur");
        assert_eq!(by_name.last().map(|e| e.name.as_str()), Some("squirtle"));

        let by_weight_desc = compute_visible(&all, "", SortKey::WeightDesc);
        assert_eq!(by_weight_desc[0].name, "charizard");
    }

    #[test]
    fn reveal_more_clamps_to_visible_length() {
        let mut state = AppState {
            all: starters(),
            revealed: 0,
            ..Default::default()
        };
        state.rebuild_visible();

        state.reveal_more(20);
        assert_eq!(state.revealed, 5);
        state.reveal_more(20);
        assert_eq!(state.revealed, 5, "revealing past the end is a no-op");
    }

    #[test]
    fn stale_reveal_cursor_is_clamped_at_read_time() {
        let mut state = AppState {
            all: starters(),
            revealed: 100,
            ..Default::default()
        };
        state.rebuild_visible();
        assert_eq!(state.visible_slice().len(), 5);

        state.query = "char".to_string();
        state.rebuild_visible();
        // revealed is not reset on a query change; the slice must clamp.
        assert_eq!(state.revealed, 100);
        assert_eq!(state.visible_slice().len(), 3);
    }

    #[test]
    fn display_name_capitalizes_hyphenated_words() {
        assert_eq!(display_name("mr-mime"), "Mr Mime");
        assert_eq!(display_name("charizard"), "Charizard");
        assert_eq!(display_name("ho-oh"), "Ho Oh");
        // Deterministic for the same input.
        assert_eq!(display_name("mr-mime"), display_name("mr-mime"));
    }
}
