//! Podcast Platform API Library
//!
//! Domain model, controllers, persistence adapters and the HTTP layer for the
//! podcast platform's REST API.

pub mod api;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod infrastructure;
