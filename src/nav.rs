//! Navigation state: location history and route recognition.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::HeroId;

/// Where an empty path lands.
pub const DEFAULT_PATH: &str = "/dashboard";

/// Browser-style history shared by every view that can navigate.
#[derive(Debug, Clone, Default)]
pub struct Location {
    history: Arc<Mutex<Vec<String>>>,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `path` onto the history.
    pub fn go(&self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!(%path, "navigate");
        self.history
            .lock()
            .expect("location lock poisoned")
            .push(path);
    }

    /// Return to the previous entry. Returns the path now current, if any.
    ///
    /// With a single entry (or none) there is nowhere to go and the history is
    /// left unchanged.
    pub fn back(&self) -> Option<String> {
        let mut history = self.history.lock().expect("location lock poisoned");
        if history.len() > 1 {
            history.pop();
        }
        let current = history.last().cloned();
        tracing::debug!(path = ?current, "navigate back");
        current
    }

    /// The current path.
    pub fn path(&self) -> Option<String> {
        self.history
            .lock()
            .expect("location lock poisoned")
            .last()
            .cloned()
    }

    pub fn depth(&self) -> usize {
        self.history.lock().expect("location lock poisoned").len()
    }
}

/// Parameters captured from a recognized path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Parameter `key` as a hero id; missing or non-numeric values read as `0`.
    pub fn id(&self, key: &str) -> HeroId {
        self.get(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// Screens of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Heroes,
    Detail(RouteParams),
}

impl Route {
    /// Match a path against the route table. An empty path is the dashboard.
    pub fn recognize(path: &str) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] | ["dashboard"] => Some(Self::Dashboard),
            ["heroes"] => Some(Self::Heroes),
            ["detail", id] => Some(Self::Detail(RouteParams::new().with("id", *id))),
            _ => None,
        }
    }

    /// Canonical path of this route.
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => DEFAULT_PATH.to_string(),
            Self::Heroes => "/heroes".to_string(),
            Self::Detail(params) => format!("/detail/{}", params.get("id").unwrap_or_default()),
        }
    }

    pub fn detail(id: HeroId) -> Self {
        Self::Detail(RouteParams::new().with("id", id.to_string()))
    }
}
