use crate::models::Hero;
use crate::service::HeroService;

use super::scope::ViewScope;

/// The hero list screen.
///
/// Holds a snapshot of the collection. Additions are appended once the server
/// has assigned an id; deletions are applied locally first and the request is
/// fired without waiting for the outcome.
#[derive(Debug)]
pub struct HeroesView {
    service: HeroService,
    scope: ViewScope<Vec<Hero>>,
}

impl HeroesView {
    pub fn new(service: HeroService) -> Self {
        Self {
            service,
            scope: ViewScope::new(Vec::new()),
        }
    }

    /// Load the collection, replacing whatever is held when it arrives.
    pub fn activate(&mut self) {
        let service = self.service.clone();
        self.scope.load(
            async move { service.list_all().await },
            |heroes, loaded| *heroes = loaded,
        );
    }

    /// Create a hero named `name` (trimmed). Blank names are ignored.
    ///
    /// Returns whether a request was issued.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let service = self.service.clone();
        let heroes = self.scope.handle();
        let draft = Hero::named(name);
        self.scope.fire(async move {
            if let Ok(hero) = service.create(&draft).await {
                heroes.update(|heroes| heroes.push(hero));
            }
        });
        true
    }

    /// Remove `hero` from the list now and ask the server to delete it.
    ///
    /// The list is not restored if the delete fails. Records without an id
    /// were never stored and are left alone.
    pub fn delete(&mut self, hero: &Hero) -> bool {
        let Some(id) = hero.id else {
            return false;
        };

        self.scope
            .update(|heroes| heroes.retain(|h| h.id != Some(id)));

        let service = self.service.clone();
        self.scope.fire(async move {
            // Outcome already reported on the message log.
            let _ = service.delete_by_id(id).await;
        });
        true
    }

    /// Snapshot of the held heroes.
    pub fn heroes(&self) -> Vec<Hero> {
        self.scope.read(Vec::clone)
    }

    /// Wait for outstanding requests started by this view.
    pub async fn settle(&mut self) {
        self.scope.settle().await;
    }

    pub fn deactivate(&self) {
        self.scope.close();
    }
}
