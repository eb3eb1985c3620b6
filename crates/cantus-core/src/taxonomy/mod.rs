pub mod genre;

pub use genre::{normalize_tag, parse_genre_list, Genre, GENRE_MENU};
