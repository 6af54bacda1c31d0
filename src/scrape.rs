use crate::report::ProfileMetadata;

/// Descriptions longer than this are cut to 297 chars plus an ellipsis.
const DESCRIPTION_MAX_CHARS: usize = 300;

/// Extract preview metadata from a profile page body.
///
/// Image: og:image, then twitter:image.
/// Description: description meta, then og:description, then
/// twitter:description, then the document title.
pub fn extract_profile_meta(resp_text: &str) -> ProfileMetadata {
    if resp_text.is_empty() {
        return ProfileMetadata::default();
    }

    let document = scraper::Html::parse_document(resp_text);
    let head_selector = scraper::Selector::parse("head").unwrap();
    let meta_selector = scraper::Selector::parse("meta").unwrap();
    let title_selector = scraper::Selector::parse("title").unwrap();

    let head = match document.select(&head_selector).next() {
        Some(h) => h,
        None => {
            return ProfileMetadata::default();
        }
    };

    let mut og_image = None;
    let mut twitter_image = None;
    let mut plain_description = None;
    let mut og_description = None;
    let mut twitter_description = None;

    for element in head.select(&meta_selector) {
        let meta_prop = element.attr("property").unwrap_or_default();

        let meta_key = element.attr("name").or(Some(meta_prop)).unwrap_or_default();
        let meta_value = element.attr("content").unwrap_or_default();

        // empty content never satisfies a chain link
        if meta_value.is_empty() {
            continue;
        }

        let slot = match meta_key {
            "og:image" => &mut og_image,
            "twitter:image" => &mut twitter_image,
            "description" | "Description" => &mut plain_description,
            "og:description" => &mut og_description,
            "twitter:description" => &mut twitter_description,
            _ => continue,
        };

        if slot.is_none() {
            *slot = Some(meta_value.to_string());
        }
    }

    let title = head
        .select(&title_selector)
        .next()
        .and_then(|element| element.text().next())
        .map(|text| text.to_string());

    let image = og_image
        .or(twitter_image)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let description = plain_description
        .or(og_description)
        .or(twitter_description)
        .or(title)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(|value| truncate_description(&value));

    ProfileMetadata { image, description }
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_MAX_CHARS {
        return description.to_string();
    }

    let mut cut: String = description
        .chars()
        .take(DESCRIPTION_MAX_CHARS - 3)
        .collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_with_meta(meta_tags: &str, title_tag: &str) -> String {
        format!(
            r#"<html><head>{meta_tags}<title>{title_tag}</title></head><body></body></html>"#
        )
    }

    #[test]
    fn test_og_image() {
        let html = html_with_meta(
            r#"<meta property="og:image" content="https://img.example.com/a.png">"#,
            "Profile",
        );
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.image.as_deref(), Some("https://img.example.com/a.png"));
    }

    #[test]
    fn test_twitter_image_fallback() {
        let html = html_with_meta(
            r#"<meta name="twitter:image" content="https://img.example.com/tw.png">"#,
            "Profile",
        );
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.image.as_deref(), Some("https://img.example.com/tw.png"));
    }

    #[test]
    fn test_og_image_beats_twitter_image_regardless_of_document_order() {
        let html = html_with_meta(
            r#"<meta name="twitter:image" content="https://img.example.com/tw.png">
               <meta property="og:image" content="https://img.example.com/og.png">"#,
            "Profile",
        );
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.image.as_deref(), Some("https://img.example.com/og.png"));
    }

    #[test]
    fn test_description_priority_over_og_description() {
        let html = html_with_meta(
            r#"<meta property="og:description" content="og text">
               <meta name="description" content="plain text">"#,
            "Profile",
        );
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.description.as_deref(), Some("plain text"));
    }

    #[test]
    fn test_twitter_description_fallback() {
        let html = html_with_meta(
            r#"<meta name="twitter:description" content="a twitter description">"#,
            "",
        );
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.description.as_deref(), Some("a twitter description"));
    }

    #[test]
    fn test_title_tag_fallback() {
        let html = html_with_meta("", "Fallback Title");
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.description.as_deref(), Some("Fallback Title"));
    }

    #[test]
    fn test_empty_content_is_skipped() {
        let html = html_with_meta(
            r#"<meta name="description" content="">
               <meta property="og:description" content="og text">"#,
            "Profile",
        );
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.description.as_deref(), Some("og text"));
    }

    #[test]
    fn test_description_is_trimmed() {
        let html = html_with_meta(
            r#"<meta name="description" content="  padded text  ">"#,
            "Profile",
        );
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.description.as_deref(), Some("padded text"));
    }

    #[test]
    fn test_long_description_is_truncated_to_300_chars() {
        let long = "x".repeat(301);
        let html = html_with_meta(
            &format!(r#"<meta name="description" content="{long}">"#),
            "Profile",
        );
        let meta = extract_profile_meta(&html);
        let description = meta.description.unwrap();
        assert_eq!(description.chars().count(), 300);
        assert!(description.ends_with("..."));
        assert!(description.starts_with("xxx"));
    }

    #[test]
    fn test_exactly_300_chars_is_unmodified() {
        let exact = "y".repeat(300);
        let html = html_with_meta(
            &format!(r#"<meta name="description" content="{exact}">"#),
            "Profile",
        );
        let meta = extract_profile_meta(&html);
        assert_eq!(meta.description.unwrap(), exact);
    }

    #[test]
    fn test_empty_body() {
        let meta = extract_profile_meta("");
        assert!(meta.image.is_none());
        assert!(meta.description.is_none());
        assert!(!meta.has_any_data());
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let meta = extract_profile_meta("<html><head><meta name=\"description\" content=\"ok");
        // best-effort parse, never a panic; whatever the parser salvages is fine
        let _ = meta.description;
    }

    #[test]
    fn test_body_without_head_metadata() {
        let meta = extract_profile_meta("<html><body><p>hello</p></body></html>");
        assert!(!meta.has_any_data());
    }
}
