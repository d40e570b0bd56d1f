use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Movie summary as returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "null_default")]
    pub vote_count: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub genre_ids: Vec<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub adult: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub original_language: String,
    #[serde(default, deserialize_with = "null_default")]
    pub original_title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub video: bool,
}

impl Movie {
    /// Minimal summary, mostly useful when only the favorite fields are known.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: None,
            vote_count: 0,
            genre_ids: Vec::new(),
            popularity: 0.0,
            adult: false,
            original_language: String::new(),
            original_title: String::new(),
            video: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: i64,
    #[serde(default)]
    pub logo_path: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub origin_country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    #[serde(default, deserialize_with = "null_default")]
    pub english_name: String,
    pub iso_639_1: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

/// Full record from `GET /movie/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default, deserialize_with = "null_default")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub budget: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub revenue: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub status: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default, deserialize_with = "null_default")]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default, deserialize_with = "null_default")]
    pub spoken_languages: Vec<SpokenLanguage>,
}

impl MovieDetails {
    /// Summary view of the details record. The details endpoint carries full
    /// genre objects instead of `genre_ids`, so the ids are rebuilt from them.
    pub fn summary(&self) -> Movie {
        let mut movie = self.movie.clone();
        if movie.genre_ids.is_empty() {
            movie.genre_ids = self.genres.iter().map(|g| g.id).collect();
        }
        movie
    }
}

/// Envelope shared by every paged list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

impl<T> Paged<T> {
    pub fn has_more_after(&self, page: i64) -> bool {
        page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProvider {
    #[serde(default, deserialize_with = "null_default")]
    pub logo_path: String,
    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub display_priority: i64,
}

/// Offers for one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub flatrate: Vec<WatchProvider>,
    #[serde(default, deserialize_with = "null_default")]
    pub rent: Vec<WatchProvider>,
    #[serde(default, deserialize_with = "null_default")]
    pub buy: Vec<WatchProvider>,
}

impl WatchProviders {
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProvidersResponse {
    pub id: i64,
    /// Keyed by ISO 3166-1 country code.
    #[serde(default)]
    pub results: BTreeMap<String, WatchProviders>,
}
