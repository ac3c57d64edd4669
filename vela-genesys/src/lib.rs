//! Vela Genesys
//!
//! Genesys Cloud directory adapters: an authenticated paginated listing
//! client plus one [`vela_core::Directory`] implementation per entity
//! type that can be resolved by name

pub mod client;
pub mod config;
pub mod directories;

pub use client::{GenesysClient, Listing};
pub use config::GenesysConfig;
pub use directories::{ListingDirectory, ListingSpec, registry};
