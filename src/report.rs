use std::io;

use serde::Serialize;

/// Preview fields pulled out of a profile page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProfileMetadata {
    /// Returns true if any useful field is present
    pub fn has_any_data(&self) -> bool {
        self.image.is_some() || self.description.is_some()
    }
}

/// Verdict for a single platform. One of these exists per catalog entry
/// in every report, whether or not the fetch succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub platform: String,
    pub key: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProfileMetadata>,
}

const CSV_HEADERS: [&str; 7] = [
    "platform",
    "key",
    "found",
    "status_code",
    "url",
    "image",
    "description",
];

/// Ordered probe results, one per catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    results: Vec<ProbeResult>,
}

impl Report {
    pub fn new(results: Vec<ProbeResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeResult> {
        self.results.iter()
    }

    pub fn found(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|result| result.found)
    }

    pub fn found_count(&self) -> usize {
        self.found().count()
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv_wrt = csv::Writer::from_writer(writer);
        csv_wrt.write_record(CSV_HEADERS)?;

        for result in &self.results {
            let metadata = result.metadata.as_ref();
            csv_wrt.write_record(&[
                result.platform.clone(),
                result.key.clone(),
                result.found.to_string(),
                result
                    .status_code
                    .map(|status| status.to_string())
                    .unwrap_or_default(),
                result.url.clone(),
                metadata.and_then(|meta| meta.image.clone()).unwrap_or_default(),
                metadata
                    .and_then(|meta| meta.description.clone())
                    .unwrap_or_default(),
            ])?;
        }

        csv_wrt.flush()?;
        Ok(())
    }
}
