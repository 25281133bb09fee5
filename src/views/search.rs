use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::models::Hero;
use crate::service::HeroService;

use super::scope::ViewScope;

#[derive(Debug, Default)]
struct SearchState {
    results: Vec<Hero>,
    /// Last term that made it past the debounce.
    last_term: Option<String>,
    /// Cancels the request sent for `last_term`.
    in_flight: Option<CancellationToken>,
}

/// Search-as-you-type box.
///
/// Each keystroke restarts the debounce timer. A term that survives the timer
/// and differs from the one searched last replaces the search in flight, so
/// only results for the latest term are applied. Returning to the term already
/// in flight leaves that request alone.
#[derive(Debug)]
pub struct HeroSearchView {
    service: HeroService,
    debounce: Duration,
    scope: ViewScope<SearchState>,
    timer: Option<CancellationToken>,
}

impl HeroSearchView {
    pub fn new(service: HeroService, debounce: Duration) -> Self {
        Self {
            service,
            debounce,
            scope: ViewScope::new(SearchState::default()),
            timer: None,
        }
    }

    /// Feed the current contents of the search box.
    pub fn search(&mut self, term: impl Into<String>) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        let timer = CancellationToken::new();
        self.timer = Some(timer.clone());

        let term = term.into();
        let service = self.service.clone();
        let state = self.scope.handle();
        let debounce = self.debounce;

        self.scope.load(
            async move {
                tokio::select! {
                    () = timer.cancelled() => return None,
                    () = tokio::time::sleep(debounce) => {}
                }

                let flight = CancellationToken::new();
                let mut changed = false;
                state.update(|s| {
                    if s.last_term.as_deref() != Some(term.as_str()) {
                        s.last_term = Some(term.clone());
                        if let Some(previous) = s.in_flight.replace(flight.clone()) {
                            previous.cancel();
                        }
                        changed = true;
                    }
                });
                if !changed {
                    return None;
                }

                let heroes = tokio::select! {
                    () = flight.cancelled() => None,
                    heroes = service.search_by_name(&term) => Some(heroes),
                };
                heroes.map(|heroes| (term, heroes))
            },
            |s, found| {
                if let Some((term, heroes)) = found {
                    if s.last_term.as_deref() == Some(term.as_str()) {
                        s.results = heroes;
                        s.in_flight = None;
                    }
                }
            },
        );
    }

    pub fn results(&self) -> Vec<Hero> {
        self.scope.read(|s| s.results.clone())
    }

    /// Wait until the latest term has been searched (or skipped).
    pub async fn settle(&mut self) {
        self.scope.settle().await;
        self.timer = None;
    }

    pub fn deactivate(&self) {
        self.scope.close();
    }
}
