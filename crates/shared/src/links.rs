//! Outbound links derived from a user record for the detail view.

use crate::domain::{Geo, UserRecord};

const MAP_BASE_URL: &str = "https://www.google.com/maps";

pub fn map_url(geo: &Geo) -> String {
    format!("{MAP_BASE_URL}?q={},{}", geo.lat.trim(), geo.lng.trim())
}

pub fn mailto_url(email: &str) -> String {
    format!("mailto:{}", email.trim())
}

/// The service returns bare host names such as `hildegard.org`; anything that
/// already names a scheme is passed through untouched.
pub fn website_url(website: &str) -> String {
    let website = website.trim();
    if has_scheme(website) {
        website.to_string()
    } else {
        format!("http://{website}")
    }
}

fn has_scheme(value: &str) -> bool {
    match value.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLinks {
    pub map: String,
    pub mailto: String,
    pub website: String,
}

impl UserLinks {
    pub fn for_user(user: &UserRecord) -> Self {
        Self {
            map: map_url(&user.address.geo),
            mailto: mailto_url(&user.email),
            website: website_url(&user.website),
        }
    }
}
