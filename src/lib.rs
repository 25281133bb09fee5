//! Hero roster client.
//!
//! - [`service::HeroService`] talks to the `api/heroes` resource and never
//!   surfaces a transport failure; failures land on the [`messages::MessageLog`].
//! - [`views`] hold render-local snapshots for the dashboard, list, detail and
//!   search screens.
//! - [`api`] and [`db`] provide a self-contained backend for the resource.

pub mod api;
pub mod config;
pub mod db;
pub mod messages;
pub mod models;
pub mod nav;
pub mod service;
pub mod views;
