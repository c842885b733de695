//! Configuration page
//!
//! Renders the page where users paste their playlist URL. The install button
//! builds a `stremio://` link carrying the percent-encoded JSON configuration.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};

use crate::addon::decode_user_config;
use crate::errors::AppResult;
use crate::web::AppState;

#[derive(Template)]
#[template(path = "configure.html")]
struct ConfigurePage<'a> {
    addon_name: &'a str,
    description: &'a str,
    playlist_url: &'a str,
    default_url: &'a str,
}

pub async fn redirect_to_configure() -> Redirect {
    Redirect::temporary("/configure")
}

pub async fn configure_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state, "")
}

/// Reconfiguration from an installed addon; pre-fills the current playlist
pub async fn configure_page_with_config(
    Path(config): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let current = decode_user_config(&config).unwrap_or_default();
    render(&state, current.playlist_url().unwrap_or(""))
}

fn render(state: &AppState, playlist_url: &str) -> AppResult<Html<String>> {
    let page = ConfigurePage {
        addon_name: &state.config.addon.name,
        description: &state.config.addon.description,
        playlist_url,
        default_url: state.resolver.default_url(),
    };
    Ok(Html(page.render()?))
}
