use crate::probe::fetch::FetchOutcome;

/// Phrases that mark a soft 404: platforms which answer a missing
/// profile with an error page instead of an error status.
const NOT_FOUND_PHRASES: [&str; 3] = [
    "page not found",
    "user not found",
    "sorry, that page doesn't exist",
];

/// Redirect targets that point at a generic onboarding page rather
/// than a canonicalized profile.
const GENERIC_REDIRECT_MARKERS: [&str; 2] = ["signup", "login"];

/// Decide whether a profile likely exists, from one fetch outcome.
///
/// 200 counts as existing. A 301/302 counts only when it moved to a
/// distinct url that is not a signup/login page. Everything else falls
/// back to body text: explicit not-found phrases lose, a literal
/// username occurrence wins.
pub fn classify(outcome: &FetchOutcome, request_url: &str, username: &str) -> bool {
    match outcome.status {
        Some(200) => true,
        Some(301) | Some(302) => {
            let final_lower = outcome.final_url.to_lowercase();
            outcome.final_url != request_url
                && !GENERIC_REDIRECT_MARKERS
                    .into_iter()
                    .any(|marker| final_lower.contains(marker))
        }
        _ => {
            let body = outcome.body.as_deref().unwrap_or_default().to_lowercase();
            if NOT_FOUND_PHRASES.into_iter().any(|phrase| body.contains(phrase)) {
                return false;
            }
            body.contains(&username.to_lowercase())
        }
    }
}
