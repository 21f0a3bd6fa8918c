//! Store page route handlers.
//!
//! The page renders three sections: banner, authentication, and the bundle
//! tiles with the checkout button. Tile selection swaps the items fragment
//! via HTMX (plain links as the no-JS fallback), so the chosen index lives
//! in the markup and a full page load starts over with nothing selected.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::models::{CATALOG, CatalogItem, Selection, Viewer};

/// Query parameters for the store page and the items fragment.
#[derive(Debug, Deserialize)]
pub struct StoreQuery {
    /// Selected tile index; absent, negative, or out of range all mean
    /// nothing chosen.
    pub selected: Option<i64>,
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "store.html")]
pub struct StoreTemplate {
    pub viewer: Viewer,
    pub items: &'static [CatalogItem],
    pub selection: Selection,
    pub selected_item: Option<&'static CatalogItem>,
    pub checkout_enabled: bool,
    pub alert: Option<String>,
}

impl StoreTemplate {
    /// Build the page for a viewer, selection, and optional alert banner.
    #[must_use]
    pub fn page(viewer: Viewer, selection: Selection, alert: Option<String>) -> Self {
        let selected_item = selection.item();
        let checkout_enabled = viewer.is_authenticated() && selected_item.is_some();
        Self {
            viewer,
            items: CATALOG,
            selection,
            selected_item,
            checkout_enabled,
            alert,
        }
    }
}

/// Items + checkout button fragment template (HTMX swap target).
#[derive(Template, WebTemplate)]
#[template(path = "partials/store_items.html")]
pub struct StoreItemsTemplate {
    pub items: &'static [CatalogItem],
    pub selection: Selection,
    pub selected_item: Option<&'static CatalogItem>,
    pub checkout_enabled: bool,
}

impl StoreItemsTemplate {
    /// Build the fragment for a viewer and selection.
    #[must_use]
    pub fn new(viewer: &Viewer, selection: Selection) -> Self {
        let selected_item = selection.item();
        Self {
            items: CATALOG,
            selection,
            selected_item,
            checkout_enabled: viewer.is_authenticated() && selected_item.is_some(),
        }
    }
}

/// Display the store page.
#[instrument(skip(viewer))]
pub async fn show(viewer: Viewer, Query(query): Query<StoreQuery>) -> StoreTemplate {
    let selection = Selection::from_param(query.selected);
    StoreTemplate::page(viewer, selection, None)
}

/// Re-render the items fragment for a new selection (HTMX).
#[instrument(skip(viewer))]
pub async fn items(viewer: Viewer, Query(query): Query<StoreQuery>) -> StoreItemsTemplate {
    let selection = Selection::from_param(query.selected);
    StoreItemsTemplate::new(&viewer, selection)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shardkeep_core::UserId;

    use crate::models::DiscordUser;

    use super::*;

    fn test_user() -> DiscordUser {
        DiscordUser {
            id: UserId::new(80_351_110_224_678_912),
            username: "nelly".to_string(),
            discriminator: "1337".to_string(),
            email: "nelly@example.com".to_string(),
            avatar: None,
        }
    }

    fn tiles(html: &str) -> Vec<&str> {
        html.split("<a class=\"tile").skip(1).collect()
    }

    #[test]
    fn test_anonymous_page_renders_login_affordance() {
        let html = StoreTemplate::page(Viewer::Anonymous, Selection::none(), None)
            .render()
            .unwrap();

        assert!(html.contains("Login with Discord"));
        assert!(html.contains("href=\"/api/login\""));
        assert!(!html.contains("Logout"));
        assert!(!html.contains("class=\"avatar\""));
    }

    #[test]
    fn test_authenticated_page_renders_identity_and_logout() {
        let viewer = Viewer::Authenticated(test_user());
        let html = StoreTemplate::page(viewer, Selection::none(), None)
            .render()
            .unwrap();

        assert!(html.contains("nelly#1337"));
        assert!(html.contains("nelly@example.com"));
        assert!(html.contains("https://cdn.discordapp.com/embed/avatars/2.png"));
        assert!(html.contains("Logout"));
        assert!(!html.contains("Login with Discord"));
    }

    #[test]
    fn test_exactly_one_tile_marked_selected() {
        let viewer = Viewer::Authenticated(test_user());
        // Selecting tile 1 then tile 3 leaves only tile 3 marked
        let mut selection = Selection::none();
        selection.select(1);
        selection.select(3);

        let html = StoreItemsTemplate::new(&viewer, selection).render().unwrap();
        let tiles = tiles(&html);
        assert_eq!(tiles.len(), CATALOG.len());
        for (index, tile) in tiles.iter().enumerate() {
            assert_eq!(
                tile.starts_with(" is-selected"),
                index == 3,
                "tile {index} selection marker"
            );
        }
    }

    #[test]
    fn test_checkout_disabled_for_anonymous_viewer() {
        let html = StoreItemsTemplate::new(&Viewer::Anonymous, Selection::from_param(Some(0)))
            .render()
            .unwrap();
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_checkout_disabled_without_selection() {
        let viewer = Viewer::Authenticated(test_user());
        let html = StoreItemsTemplate::new(&viewer, Selection::none())
            .render()
            .unwrap();
        assert!(html.contains("disabled"));
        // No price suffix on the button either
        assert!(!html.contains("($"));
    }

    #[test]
    fn test_checkout_enabled_shows_selected_price() {
        let viewer = Viewer::Authenticated(test_user());
        let html = StoreItemsTemplate::new(&viewer, Selection::from_param(Some(0)))
            .render()
            .unwrap();

        assert!(!html.contains("disabled"));
        assert!(html.contains("($5)"));
        assert!(html.contains("name=\"item\" value=\"0\""));
    }

    #[test]
    fn test_alert_banner_carries_message() {
        let viewer = Viewer::Authenticated(test_user());
        let html = StoreTemplate::page(viewer, Selection::from_param(Some(0)), Some("Card declined".to_string()))
            .render()
            .unwrap();

        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Card declined"));
    }

    #[test]
    fn test_tiles_render_names_and_prices() {
        let html = StoreItemsTemplate::new(&Viewer::Anonymous, Selection::none())
            .render()
            .unwrap();

        assert!(html.contains("500 Shards"));
        assert!(html.contains("$5 USD"));
        assert!(html.contains("15,000 Shards"));
        assert!(html.contains("$100 USD"));
    }
}
