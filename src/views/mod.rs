//! View models for the hero screens.
//!
//! Views hold render-local snapshots fetched through
//! [`HeroService`](crate::service::HeroService); the server keeps the
//! authoritative records. Every view owns a [`ViewScope`], so responses that
//! arrive after `deactivate` (or drop) never reach its state.
//!
//! - [`DashboardView`]: a few featured heroes.
//! - [`HeroesView`]: the full list with add and delete.
//! - [`HeroDetailView`]: one hero, editable, saved back as a whole.
//! - [`HeroSearchView`]: debounced name search.

mod dashboard;
mod detail;
mod heroes;
mod scope;
mod search;

pub use dashboard::DashboardView;
pub use detail::HeroDetailView;
pub use heroes::HeroesView;
pub use scope::{StateHandle, ViewScope};
pub use search::HeroSearchView;
