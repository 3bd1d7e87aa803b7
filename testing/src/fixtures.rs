//! Canonical catalog fixtures used across the workspace's tests.

use taproom_core::types::{Beer, BeerId};

/// Builds a bare fixture with only the fields the pipeline interprets
#[must_use]
pub fn beer(id: u64, name: &str, abv: Option<f64>) -> Beer {
    Beer {
        id: BeerId::new(id),
        name: name.to_string(),
        tagline: None,
        first_brewed: None,
        description: None,
        abv,
        ibu: None,
        image_url: None,
    }
}

/// "Buzz", 4.5% — the catalog's first entry
#[must_use]
pub fn buzz() -> Beer {
    Beer {
        tagline: Some("A Real Bitter Experience.".to_string()),
        first_brewed: Some("09/2007".to_string()),
        ibu: Some(60.0),
        ..beer(1, "Buzz", Some(4.5))
    }
}

/// "Trashy Blonde", 4.1%
#[must_use]
pub fn trashy_blonde() -> Beer {
    Beer {
        tagline: Some("You Know You Shouldn't.".to_string()),
        first_brewed: Some("04/2008".to_string()),
        ibu: Some(41.5),
        ..beer(2, "Trashy Blonde", Some(4.1))
    }
}

/// "Punk IPA", 5.6%
#[must_use]
pub fn punk_ipa() -> Beer {
    Beer {
        tagline: Some("Post Modern Classic.".to_string()),
        first_brewed: Some("04/2007".to_string()),
        ibu: Some(60.0),
        ..beer(3, "Punk IPA", Some(5.6))
    }
}

/// A prototype entry without a published ABV
#[must_use]
pub fn prototype() -> Beer {
    beer(4, "Prototype 27", None)
}

/// The three-beer page the acceptance scenarios are written against
#[must_use]
pub fn sample_page() -> Vec<Beer> {
    vec![buzz(), trashy_blonde(), punk_ipa()]
}
