//! Helpers shared by the GitHub and GitLab REST clients.

use reqwest::StatusCode;
use reqwest::blocking::Response;

use crate::error::{Forge, MigrateError, Result};

/// Page size requested from both forges.
pub(crate) const PER_PAGE: usize = 100;

/// Upper bound on pages fetched for a single listing.
const MAX_PAGES: usize = 100;

/// Turn a non-success response into a [`MigrateError`].
///
/// 404 becomes [`MigrateError::NotFound`] so callers can tell a missing
/// resource apart from other failures.
pub(crate) fn check_status(forge: Forge, endpoint: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        return Err(MigrateError::NotFound {
            forge,
            resource: endpoint.to_string(),
        });
    }

    Err(MigrateError::Api {
        forge,
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extract the human-readable part of an API error body.
///
/// Both forges answer with `{"message": ...}`; GitLab sometimes uses
/// `{"error": ...}` or a structured message object instead.
pub(crate) fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let field = value.get("message").or_else(|| value.get("error"));
    let mut message = match field {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    };

    // GitHub puts the interesting part of a 422 in `errors`.
    if let Some(errors) = value.get("errors").and_then(|e| e.as_array()) {
        let details: Vec<String> = errors
            .iter()
            .filter_map(|e| e.get("message").and_then(|m| m.as_str()).map(String::from))
            .collect();
        if !details.is_empty() {
            message = format!("{}: {}", message, details.join("; "));
        }
    }

    message
}

/// Append pagination parameters to an endpoint.
pub(crate) fn paged_endpoint(endpoint: &str, page: usize) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}per_page={}&page={}", endpoint, separator, PER_PAGE, page)
}

/// Fetch every page of a listing.
///
/// Stops at the first short page. A listing still returning full pages after
/// [`MAX_PAGES`] fails with [`MigrateError::PageLimit`]; a truncated listing
/// would let duplicates through the title checks.
pub(crate) fn collect_pages<T, F>(endpoint: &str, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(&str) -> Result<Vec<T>>,
{
    let mut all = Vec::new();
    let mut page = 1;

    loop {
        let items = fetch(&paged_endpoint(endpoint, page))?;
        let count = items.len();
        all.extend(items);

        if count < PER_PAGE {
            break;
        }

        page += 1;

        if page > MAX_PAGES {
            return Err(MigrateError::PageLimit {
                endpoint: endpoint.to_string(),
                pages: MAX_PAGES,
            });
        }
    }

    Ok(all)
}
