//! Response shapes with display strings already computed, so thin clients do
//! not need to repeat the year/rating/runtime formatting rules.

use cinescope_browse::catalog::MoviePage;
use cinescope_core::display;
use cinescope_core::types::{Movie, MovieDetails};
use cinescope_db::FavoriteRecord;
use cinescope_tmdb::{ImageSize, image_url};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: display::release_year(movie.release_date.as_deref()),
            rating: display::rating(movie.vote_average),
            poster_url: image_url(movie.poster_path.as_deref(), ImageSize::W500),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieDetailView {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub year: String,
    pub rating: String,
    pub runtime_label: String,
    pub poster_url: String,
    pub backdrop_url: String,
    pub similar: Vec<MovieCard>,
    pub favorite: bool,
}

impl MovieDetailView {
    pub fn new(page: MoviePage, favorite: bool) -> Self {
        let movie = &page.details.movie;
        Self {
            year: display::release_year(movie.release_date.as_deref()),
            rating: display::rating(movie.vote_average),
            runtime_label: display::runtime(page.details.runtime),
            poster_url: image_url(movie.poster_path.as_deref(), ImageSize::W500),
            backdrop_url: image_url(movie.backdrop_path.as_deref(), ImageSize::Original),
            similar: page.similar.iter().map(MovieCard::from).collect(),
            favorite,
            details: page.details,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoriteView {
    #[serde(flatten)]
    pub record: FavoriteRecord,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
}

impl From<FavoriteRecord> for FavoriteView {
    fn from(record: FavoriteRecord) -> Self {
        Self {
            year: display::release_year(record.release_date.as_deref()),
            rating: display::rating(record.vote_average),
            poster_url: image_url(record.poster_path.as_deref(), ImageSize::W185),
            record,
        }
    }
}
