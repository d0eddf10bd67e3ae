//! Pokedex data core: catalog loading, view-state derivation, and detail
//! aggregation over the public PokeAPI.
//!
//! Rendering stays outside this crate; consumers drive [`reducer::reduce`]
//! with [`action::Action`]s, execute the returned [`effect::Effect`]s via
//! [`effect::run`], and read shaped data off [`state::AppState`].

pub mod action;
pub mod api;
pub mod effect;
pub mod reducer;
pub mod state;
