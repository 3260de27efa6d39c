//! Local favorites list.

use anyhow::Result;
use pianoteq_client::PresetType;
use serde_json::json;

use super::Context;
use crate::ui;

/// Favorites action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    /// Show local favorites, optionally merged with the server's flags.
    List {
        /// Also list presets the server marks as favourite.
        server: bool,
    },
    /// Add a preset.
    Add {
        /// Preset name.
        name: String,
    },
    /// Remove a preset.
    Remove {
        /// Preset name.
        name: String,
    },
    /// Flip a preset's membership.
    Toggle {
        /// Preset name.
        name: String,
    },
}

/// Run a favorites action.
pub async fn run_favorites(ctx: &Context, action: FavoritesAction) -> Result<()> {
    let mut favorites = ctx.favorites().await?;

    match action {
        FavoritesAction::List { server } => {
            let local = favorites.all();
            let remote: Vec<String> = if server {
                ctx.client
                    .get_list_of_presets(PresetType::Full)
                    .await?
                    .into_iter()
                    .filter(|p| p.is_favourite())
                    .map(|p| p.name)
                    .collect()
            } else {
                Vec::new()
            };

            if ctx.json {
                return ui::json(&json!({ "local": local, "server": remote }));
            }

            ui::header("Favorites");
            if local.is_empty() {
                ui::info("No local favorites");
            }
            for name in &local {
                println!("  {} {name}", ui::star(true));
            }

            if server {
                ui::header("Server favourites");
                for name in &remote {
                    let marker = if favorites.is_favorite(name) { "" } else { " (server only)" };
                    println!("  {} {name}{marker}", ui::star(true));
                }
            }
        }
        FavoritesAction::Add { name } => {
            favorites.add(&name).await?;
            ui::success(&format!("Added '{name}' to favorites"));
        }
        FavoritesAction::Remove { name } => {
            if favorites.is_favorite(&name) {
                favorites.remove(&name).await?;
                ui::success(&format!("Removed '{name}' from favorites"));
            } else {
                ui::warning(&format!("'{name}' is not a favorite"));
            }
        }
        FavoritesAction::Toggle { name } => {
            if favorites.toggle(&name).await? {
                ui::success(&format!("Added '{name}' to favorites"));
            } else {
                ui::success(&format!("Removed '{name}' from favorites"));
            }
        }
    }
    Ok(())
}
