use catalog_models::{ContentItem, VideoCandidate, VideoType};
use catalog_sources::CatalogSource;
use tracing::{debug, warn};

/// Only clips hosted here are playable
pub const APPROVED_SITE: &str = "YouTube";

#[derive(Debug, Clone, Copy)]
enum Language {
    Fixed(&'static str),
    /// The title's original language, unless it is one of the fixed ones
    Original,
}

#[derive(Debug, Clone, Copy)]
struct Step {
    language: Language,
    region: Option<&'static str>,
}

/// Tried in order for Trailer, then again for Teaser
const LANGUAGE_STEPS: [Step; 5] = [
    Step { language: Language::Fixed("es"), region: Some("MX") },
    Step { language: Language::Fixed("es"), region: Some("ES") },
    Step { language: Language::Fixed("es"), region: None },
    Step { language: Language::Fixed("en"), region: None },
    Step { language: Language::Original, region: None },
];

const CLIP_TYPES: [VideoType; 2] = [VideoType::Trailer, VideoType::Teaser];

/// Outcome of looking up a title's clip
#[derive(Debug, Clone, PartialEq)]
pub enum TrailerResolution {
    Found(VideoCandidate),
    NotFound,
    /// The video listing could not be fetched
    Failed,
}

impl TrailerResolution {
    pub fn key(&self) -> Option<&str> {
        match self {
            TrailerResolution::Found(video) => Some(&video.key),
            _ => None,
        }
    }
}

fn step_language<'a>(step: &Step, original_language: &'a str) -> Option<&'a str> {
    match step.language {
        Language::Fixed(code) => Some(code),
        Language::Original => match original_language {
            "" | "en" | "es" => None,
            code => Some(code),
        },
    }
}

/// Pick the best clip: localized trailers first, then English, then the
/// original language, then the same ladder for teasers. First match wins.
pub fn select_trailer<'a>(original_language: &str, candidates: &'a [VideoCandidate]) -> Option<&'a VideoCandidate> {
    let playable: Vec<&VideoCandidate> = candidates.iter().filter(|v| v.site == APPROVED_SITE).collect();

    for clip_type in CLIP_TYPES {
        for step in &LANGUAGE_STEPS {
            let Some(language) = step_language(step, original_language) else {
                continue;
            };
            let found = playable.iter().copied().find(|v| {
                v.video_type == clip_type
                    && v.language_code == language
                    && step.region.map_or(true, |region| v.region_code == region)
            });
            if found.is_some() {
                return found;
            }
        }
    }

    None
}

/// Fetch the title's videos and select one
pub async fn resolve_trailer(catalog: &dyn CatalogSource, item: &ContentItem) -> TrailerResolution {
    match catalog.fetch_videos(item.id, item.media_type).await {
        Ok(videos) => match select_trailer(&item.original_language, &videos) {
            Some(video) => {
                debug!(id = item.id, media_type = %item.media_type, key = %video.key, "Trailer selected");
                TrailerResolution::Found(video.clone())
            }
            None => {
                debug!(id = item.id, media_type = %item.media_type, candidates = videos.len(), "No trailer found");
                TrailerResolution::NotFound
            }
        },
        Err(e) => {
            warn!(id = item.id, media_type = %item.media_type, "Failed to fetch videos: {}", e);
            TrailerResolution::Failed
        }
    }
}
