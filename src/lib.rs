//! Fetches a single web resource and describes it as a typed card
//! (article, link, image or video) built from its metadata tags.

pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod metadata;
pub mod models;
pub mod state;
