//! # Pianoteq Core
//!
//! Configuration and local state shared by Pianoteq tools.
//!
//! This crate provides:
//! - Configuration loading and validation (JSON5 format)
//! - Client-side favorite presets behind a pluggable key-value store

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod favorites;

pub use config::{Config, ConfigError, LogFormat};
pub use favorites::{Favorites, FavoritesError, FavoritesStore, JsonFileStore, MemoryStore};
