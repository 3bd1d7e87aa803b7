//! Command-line demo driving the catalog store against the live API.
//!
//! Walks through the main flows: load a page, sort, search, favorite a
//! couple of beers, and browse the favorites source offline.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use taproom_client::CatalogClient;
use taproom_core::environment::SystemClock;
use taproom_core::types::{AbvRange, Mode, SortDirection, SortSpec};
use taproom_runtime::{Catalog, FavoritesStore, SessionStorage};

const SETTLE: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Taproom Demo ===\n");

    let storage = Arc::new(SessionStorage::new());
    let favorites = Arc::new(FavoritesStore::new(storage, Arc::new(SystemClock)));
    let catalog = Catalog::new(Arc::new(CatalogClient::new()), favorites);

    println!("Loading the first page...");
    catalog.load().await.wait_with_timeout(SETTLE).await?;
    print_view(&catalog).await;

    println!("\nSorting by name...");
    catalog
        .set_sort_spec(SortSpec::by_name(SortDirection::Asc))
        .await
        .wait_with_timeout(SETTLE)
        .await?;
    print_view(&catalog).await;

    println!("\nFiltering to 4.5% ABV and up...");
    catalog
        .set_abv_range(AbvRange::new(Some(4.5), None))
        .await
        .wait_with_timeout(SETTLE)
        .await?;
    print_view(&catalog).await;

    // Favorite the first two visible beers.
    let picks: Vec<_> = catalog.view().await.items.into_iter().take(2).collect();
    for beer in picks {
        println!("\nFavoriting {}...", beer.name);
        catalog.toggle_favorite(beer).await;
    }

    println!("\nSwitching to the favorites source...");
    catalog
        .set_mode(Mode::Favorites)
        .await
        .wait_with_timeout(SETTLE)
        .await?;
    print_view(&catalog).await;

    println!("\nBack to the full catalog...");
    catalog.reset_filters().await.wait_with_timeout(SETTLE).await?;
    print_view(&catalog).await;

    println!("\n=== Demo Complete ===");
    Ok(())
}

async fn print_view(catalog: &Catalog) {
    let view = catalog.view().await;

    if let Some(error) = &view.last_error {
        println!("  ! {error}");
    }
    if let Some(empty) = view.empty_state {
        println!("  ({})", empty.message());
    }
    for beer in &view.items {
        let marker = if catalog.is_favorite(beer.id) { "*" } else { " " };
        match beer.abv {
            Some(abv) => println!("  [{marker}] {:<28} {abv:>4.1}%", beer.name),
            None => println!("  [{marker}] {:<28}    -", beer.name),
        }
    }
    println!(
        "  page {} | mode {} | {} shown",
        view.page,
        view.mode,
        view.items.len()
    );
    if let Some(remaining) = catalog.rate_limit_remaining() {
        println!("  rate limit remaining: {remaining}");
    }
}
