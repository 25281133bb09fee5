//! HTTP data access for the hero roster.
//!
//! [`HeroService`] is the only component that talks to the `api/heroes`
//! resource. No operation ever hands a transport error to its caller: failures
//! are reported on the [`MessageLog`] and replaced by a fallback (an empty
//! list for reads of collections) or by [`LoggedAndSuppressed`].

mod suppress;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::messages::MessageLog;
use crate::models::{Hero, HeroId};

pub use suppress::LoggedAndSuppressed;
use suppress::ErrorHandler;

/// Prefix of every message this service logs.
const SERVICE_NAME: &str = "HeroService";

/// Transport-level failures, before interception.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Http failure response for {url}: {status}")]
    Status { url: String, status: StatusCode },

    #[error("Http failure during request: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the hero collection.
#[derive(Debug, Clone)]
pub struct HeroService {
    heroes_url: String,
    client: Client,
    errors: ErrorHandler,
}

impl HeroService {
    pub fn new(config: &ClientConfig, messages: MessageLog) -> Self {
        Self {
            heroes_url: config.heroes_url(),
            client: Client::new(),
            errors: ErrorHandler::new(SERVICE_NAME, messages),
        }
    }

    /// Build a request against the collection URL plus `suffix`.
    fn request(&self, method: Method, suffix: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.heroes_url, suffix))
    }

    /// Turn non-2xx statuses into errors and decode the JSON body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Like `handle_response` for acknowledgements whose body is ignored.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        check_status(response)?;
        Ok(())
    }

    fn log(&self, message: impl AsRef<str>) {
        self.errors.log(message);
    }

    /// Fetch the whole collection. Empty on failure.
    pub async fn list_all(&self) -> Vec<Hero> {
        let result = self.fetch_all().await.inspect(|heroes| {
            tracing::debug!(count = heroes.len(), "fetched heroes");
            self.log("fetched heroes");
        });

        // Fallback given, so this is always Ok.
        result
            .or_else(self.errors.handle_error("getHeroes", Some(Vec::new())))
            .unwrap_or_default()
    }

    /// Fetch one hero.
    pub async fn get_by_id(&self, id: HeroId) -> Result<Hero, LoggedAndSuppressed> {
        self.fetch_one(id)
            .await
            .inspect(|hero| {
                tracing::debug!(?hero, "fetched hero");
                self.log(format!("fetched hero id={id}"));
            })
            .or_else(self.errors.handle_error(format!("getHero id={id}"), None))
    }

    /// Find heroes whose name matches `term`.
    ///
    /// A blank term short-circuits to an empty list without a request.
    pub async fn search_by_name(&self, term: &str) -> Vec<Hero> {
        if term.trim().is_empty() {
            return Vec::new();
        }

        let result = self.fetch_matching(term).await.inspect(|heroes| {
            if heroes.is_empty() {
                self.log(format!("no heroes matching \"{term}\""));
            } else {
                self.log(format!("found heroes matching \"{term}\""));
            }
        });

        result
            .or_else(self.errors.handle_error("searchHeroes", Some(Vec::new())))
            .unwrap_or_default()
    }

    /// Create a hero; the server assigns the id.
    pub async fn create(&self, hero: &Hero) -> Result<Hero, LoggedAndSuppressed> {
        self.post(hero)
            .await
            .inspect(|created| match created.id {
                Some(id) => self.log(format!("added hero w/ id={id}")),
                None => self.log("added hero w/ id=unknown"),
            })
            .or_else(self.errors.handle_error("addHero", None))
    }

    /// Replace the stored hero with `hero`, matched by its id.
    pub async fn update(&self, hero: &Hero) -> Result<(), LoggedAndSuppressed> {
        self.put(hero)
            .await
            .inspect(|_| match hero.id {
                Some(id) => self.log(format!("updated hero id={id}")),
                None => self.log("updated hero id=unknown"),
            })
            .or_else(self.errors.handle_error("updateHero", None))
    }

    pub async fn delete_by_id(&self, id: HeroId) -> Result<(), LoggedAndSuppressed> {
        self.delete(id)
            .await
            .inspect(|_| self.log(format!("deleted hero id={id}")))
            .or_else(self.errors.handle_error("deleteHero", None))
    }

    // ============================================================
    // Raw requests
    // ============================================================

    async fn fetch_all(&self) -> Result<Vec<Hero>, ClientError> {
        let response = self.request(Method::GET, "").send().await?;
        self.handle_response(response).await
    }

    async fn fetch_one(&self, id: HeroId) -> Result<Hero, ClientError> {
        let response = self.request(Method::GET, &format!("/{id}")).send().await?;
        self.handle_response(response).await
    }

    async fn fetch_matching(&self, term: &str) -> Result<Vec<Hero>, ClientError> {
        let response = self
            .request(Method::GET, "/")
            .query(&[("name", term)])
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn post(&self, hero: &Hero) -> Result<Hero, ClientError> {
        let response = self.request(Method::POST, "").json(hero).send().await?;
        self.handle_response(response).await
    }

    async fn put(&self, hero: &Hero) -> Result<(), ClientError> {
        let response = self.request(Method::PUT, "").json(hero).send().await?;
        self.handle_empty_response(response).await
    }

    async fn delete(&self, id: HeroId) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/{id}"))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            url: response.url().to_string(),
            status,
        })
    }
}
