use crate::models::Hero;
use crate::nav::{Location, RouteParams};
use crate::service::HeroService;

use super::scope::ViewScope;

/// The single-hero editor.
///
/// Resolves the hero id from the route, fetches the record and lets the user
/// edit it in place. Saving always returns to the previous location once the
/// update resolves, whether or not the server accepted it.
#[derive(Debug)]
pub struct HeroDetailView {
    service: HeroService,
    params: RouteParams,
    location: Location,
    scope: ViewScope<Option<Hero>>,
}

impl HeroDetailView {
    pub fn new(service: HeroService, params: RouteParams, location: Location) -> Self {
        Self {
            service,
            params,
            location,
            scope: ViewScope::new(None),
        }
    }

    /// Fetch the hero named by the `id` route parameter.
    pub fn activate(&mut self) {
        let id = self.params.id("id");
        let service = self.service.clone();
        self.scope.load(
            async move { service.get_by_id(id).await },
            |hero, fetched| {
                if let Ok(fetched) = fetched {
                    *hero = Some(fetched);
                }
            },
        );
    }

    pub fn hero(&self) -> Option<Hero> {
        self.scope.read(Option::clone)
    }

    /// Edit the held hero in place. No-op until a hero has loaded.
    pub fn edit(&self, f: impl FnOnce(&mut Hero)) -> bool {
        let mut edited = false;
        self.scope.update(|hero| {
            if let Some(hero) = hero.as_mut() {
                f(hero);
                edited = true;
            }
        });
        edited
    }

    pub fn set_name(&self, name: impl Into<String>) -> bool {
        let name = name.into();
        self.edit(|hero| hero.name = name)
    }

    pub fn go_back(&self) {
        self.location.back();
    }

    /// Submit the held hero and navigate back when the update resolves.
    ///
    /// Returns whether an update was issued; nothing happens until a hero
    /// has loaded.
    pub fn save(&mut self) -> bool {
        let Some(hero) = self.hero() else {
            return false;
        };

        let service = self.service.clone();
        let location = self.location.clone();
        self.scope.fire(async move {
            // A failed update was already reported; leave either way.
            let _ = service.update(&hero).await;
            location.back();
        });
        true
    }

    /// Wait for outstanding requests started by this view.
    pub async fn settle(&mut self) {
        self.scope.settle().await;
    }

    pub fn deactivate(&self) {
        self.scope.close();
    }
}
