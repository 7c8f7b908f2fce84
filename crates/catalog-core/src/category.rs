use catalog_models::MediaType;
use std::fmt;

/// Which catalog sources a browse context draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Movies and shows paged in lockstep
    Mixed,
    Movie,
    Tv,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Mixed => "mixed",
            ContentKind::Movie => "movie",
            ContentKind::Tv => "tv",
        }
    }
}

impl From<MediaType> for ContentKind {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Movie => ContentKind::Movie,
            MediaType::Tv => ContentKind::Tv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Popular,
    Genre(u32),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Popular => f.write_str("popular"),
            Category::Genre(id) => write!(f, "genre:{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: &'static str,
}

pub const KNOWN_GENRES: &[Genre] = &[
    Genre { id: 28, name: "Action" },
    Genre { id: 12, name: "Adventure" },
    Genre { id: 16, name: "Animation" },
    Genre { id: 35, name: "Comedy" },
    Genre { id: 80, name: "Crime" },
    Genre { id: 99, name: "Documentary" },
    Genre { id: 18, name: "Drama" },
    Genre { id: 10751, name: "Family" },
    Genre { id: 14, name: "Fantasy" },
    Genre { id: 36, name: "History" },
    Genre { id: 27, name: "Horror" },
    Genre { id: 878, name: "Science Fiction" },
];

pub fn genre_name(id: u32) -> Option<&'static str> {
    KNOWN_GENRES.iter().find(|g| g.id == id).map(|g| g.name)
}
