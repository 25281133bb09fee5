use std::ops::Range;

use crate::models::Hero;
use crate::service::HeroService;

use super::scope::ViewScope;

/// Positions of the collection featured on the dashboard.
const TOP_HEROES: Range<usize> = 1..5;

/// Landing screen featuring a handful of heroes.
#[derive(Debug)]
pub struct DashboardView {
    service: HeroService,
    scope: ViewScope<Vec<Hero>>,
}

impl DashboardView {
    pub fn new(service: HeroService) -> Self {
        Self {
            service,
            scope: ViewScope::new(Vec::new()),
        }
    }

    pub fn activate(&mut self) {
        let service = self.service.clone();
        self.scope.load(
            async move { service.list_all().await },
            |top, heroes| *top = top_heroes(heroes),
        );
    }

    pub fn top_heroes(&self) -> Vec<Hero> {
        self.scope.read(Vec::clone)
    }

    pub async fn settle(&mut self) {
        self.scope.settle().await;
    }

    pub fn deactivate(&self) {
        self.scope.close();
    }
}

fn top_heroes(heroes: Vec<Hero>) -> Vec<Hero> {
    heroes
        .into_iter()
        .skip(TOP_HEROES.start)
        .take(TOP_HEROES.len())
        .collect()
}
