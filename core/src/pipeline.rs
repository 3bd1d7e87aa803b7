//! The derived-state pipeline: source selection, filtering, and sorting.
//!
//! Each stage is a pure function. The runtime recomputes the whole chain on
//! every read, so there is no cached derived state to invalidate — the
//! visible list is always consistent with the latest applied mutation.

use crate::types::{AbvRange, Beer, Mode, SortDirection, SortKey, SortSpec};
use std::cmp::Ordering;

/// Stage 1: picks the collection feeding the rest of the pipeline.
///
/// Pure selection on `mode` — no filtering or ordering happens here.
#[must_use]
pub const fn select_source<'a>(mode: Mode, remote: &'a [Beer], favorites: &'a [Beer]) -> &'a [Beer] {
    match mode {
        Mode::Remote => remote,
        Mode::Favorites => favorites,
    }
}

/// Case-insensitive substring match against the display name.
///
/// A blank (all-whitespace) needle matches everything.
#[must_use]
pub fn matches_name(beer: &Beer, search_text: &str) -> bool {
    let needle = search_text.trim();
    if needle.is_empty() {
        return true;
    }
    beer.name.to_lowercase().contains(&needle.to_lowercase())
}

/// Stage 2: narrows the selected collection by name and ABV.
///
/// The two filters compose with logical AND and the stage preserves input
/// order. Items without an ABV are excluded whenever either bound is set.
#[must_use]
pub fn filter<'a>(items: &'a [Beer], search_text: &str, abv_range: &AbvRange) -> Vec<&'a Beer> {
    items
        .iter()
        .filter(|beer| matches_name(beer, search_text) && abv_range.admits(beer.abv))
        .collect()
}

/// Stage 3: orders the filtered collection in place.
///
/// `Natural` leaves the input untouched — remote mode's natural order is
/// the server's recommended order and must not be reconstructed client
/// side. The sort is stable, so equal keys keep their relative input order.
pub fn sort(items: &mut [&Beer], spec: SortSpec) {
    match spec.key {
        SortKey::Natural => {}
        SortKey::Name => {
            items.sort_by(|a, b| directed(compare_names(a, b), spec.direction));
        }
        SortKey::Abv => {
            items.sort_by(|a, b| compare_abv(a, b, spec.direction));
        }
    }
}

const fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

fn compare_names(a: &Beer, b: &Beer) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Items without an ABV sort after every item with one, in *both*
/// directions; the direction inverts only the non-null comparison.
fn compare_abv(a: &Beer, b: &Beer, direction: SortDirection) -> Ordering {
    match (a.abv, b.abv) {
        (Some(x), Some(y)) => directed(x.total_cmp(&y), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
