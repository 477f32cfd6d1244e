//! Video grid view model: one card per record with a download action.

use std::fmt::Write as _;
use vidup_core::models::VideoRecord;
use vidup_core::MediaUrlBuilder;

pub const EMPTY_GRID_MESSAGE: &str = "No videos available";

/// Download action of a card: fetch `url`, save as `filename`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadLink {
    pub url: String,
    pub filename: String,
}

impl DownloadLink {
    pub fn new(record: &VideoRecord, urls: &MediaUrlBuilder) -> Self {
        Self {
            url: urls.video_url(&record.public_id),
            filename: download_filename(&record.title, urls.format()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoCard {
    pub public_id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: String,
    pub duration: String,
    pub original_size: String,
    pub compressed_size: String,
    /// Whole-percent size reduction, when both sizes are numeric
    pub compression: Option<i64>,
    pub download: DownloadLink,
}

impl VideoCard {
    pub fn new(record: &VideoRecord, urls: &MediaUrlBuilder) -> Self {
        Self {
            public_id: record.public_id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            thumbnail_url: urls.thumbnail_url(&record.public_id),
            duration: format_duration(record.duration),
            original_size: size_label(record.original_bytes(), &record.original_size),
            compressed_size: size_label(record.compressed_bytes(), &record.compressed_size),
            compression: record.compression_percentage(),
            download: DownloadLink::new(record, urls),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VideoGrid {
    cards: Vec<VideoCard>,
}

impl VideoGrid {
    pub fn new(records: &[VideoRecord], urls: &MediaUrlBuilder) -> Self {
        Self {
            cards: records.iter().map(|r| VideoCard::new(r, urls)).collect(),
        }
    }

    pub fn cards(&self) -> &[VideoCard] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find a card by public id, falling back to an exact title match.
    pub fn find(&self, key: &str) -> Option<&VideoCard> {
        self.cards
            .iter()
            .find(|c| c.public_id == key)
            .or_else(|| self.cards.iter().find(|c| c.title == key))
    }

    pub fn render_text(&self) -> String {
        if self.cards.is_empty() {
            return format!("{}\n", EMPTY_GRID_MESSAGE);
        }

        let mut out = String::new();
        for card in &self.cards {
            let title = if card.title.is_empty() {
                "(untitled)"
            } else {
                card.title.as_str()
            };
            let _ = writeln!(out, "{}  [{}]", title, card.duration);
            let _ = writeln!(out, "  id:        {}", card.public_id);
            if let Some(description) = &card.description {
                let _ = writeln!(out, "  about:     {}", description);
            }
            let _ = write!(out, "  size:      {} -> {}", card.original_size, card.compressed_size);
            match card.compression {
                Some(pct) => {
                    let _ = writeln!(out, " ({}% smaller)", pct);
                }
                None => out.push('\n'),
            }
            let _ = writeln!(out, "  download:  {}", card.download.url);
        }
        out
    }
}

/// `m:ss`; fractional seconds are truncated.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

fn size_label(bytes: Option<u64>, raw: &str) -> String {
    match bytes {
        Some(b) => format_size(b),
        None => raw.to_string(),
    }
}

/// `<title>.<format>` with path separators replaced; `video` when the title is blank.
pub fn download_filename(title: &str, format: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    let stem = if stem.is_empty() { "video".to_string() } else { stem };
    format!("{}.{}", stem, format)
}
