//! End-to-end behavior of filtering, ranking and paging over small catalogs.

use std::sync::Arc;
use std::thread;

use cantus_core::model::{AudioFeature, FeatureVector, Query, Song, YearRange};
use cantus_core::Catalog;
use cantus_search::{Recommender, Session};

fn two_song_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::new(vec![
        Song::new(
            "a",
            "rock",
            1990,
            10.0,
            FeatureVector::new([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]),
        ),
        Song::new(
            "b",
            "rock",
            1995,
            5.0,
            FeatureVector::new([0.9, 0.8, 0.7, 0.6, 0.5, 0.4]),
        ),
    ]))
}

/// A catalog spread over several genres and decades with varied features.
fn mixed_catalog() -> Arc<Catalog> {
    let genres = ["rock", "pop", "jazz", "hip hop"];
    let songs = (0..400_u32)
        .map(|i| {
            let f = |k: u32| f64::from((i * k + 3) % 101) / 100.0;
            Song::new(
                format!("spotify:track:{i:04}"),
                genres[(i % 4) as usize],
                1960 + i32::try_from(i % 60).unwrap(),
                f64::from((i * 37) % 100),
                FeatureVector::new([f(3), f(7), f(11), f(13), f(17), 60.0 + f(19) * 140.0]),
            )
        })
        .collect();
    Arc::new(Catalog::new(songs))
}

fn query(genre: &str, start: i32, end: i32, features: [f64; 6]) -> Query {
    Query::new(genre, YearRange::new(start, end), FeatureVector::new(features))
}

#[test]
fn test_closest_song_ranks_first() {
    let recommender = Recommender::new(two_song_catalog());
    let ranked = recommender
        .recommend(&query("rock", 1980, 2000, [0.1, 0.2, 0.3, 0.4, 0.5, 0.6]))
        .unwrap();
    assert_eq!(ranked.track_ids(), vec!["a", "b"]);
}

#[test]
fn test_unknown_genre_gives_empty_page() {
    let mut session = Recommender::new(two_song_catalog()).session(6);
    let eval = session
        .evaluate_query(&query("jazz", 1980, 2000, [0.1, 0.2, 0.3, 0.4, 0.5, 0.6]))
        .unwrap();

    assert!(eval.results.is_empty());
    assert!(eval.page.is_empty());
    assert!(session.advance_page().is_empty());
    assert_eq!(session.offset(), 0);
}

#[test]
fn test_results_satisfy_filters_and_are_sorted() {
    let recommender = Recommender::new(mixed_catalog());
    let q = query("Pop", 1970, 1999, [0.2, 0.7, 0.6, 0.1, 0.5, 110.0]);
    let ranked = recommender.recommend(&q).unwrap();

    assert!(!ranked.is_empty());
    for entry in &ranked {
        assert_eq!(entry.genre, "pop");
        assert!((1970..=1999).contains(&entry.release_year));
        assert!((entry.distance - entry.features.distance(&q.features)).abs() < 1e-12);
    }
    for pair in ranked.entries().windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[test]
fn test_candidate_cap_keeps_top_popularity() {
    let songs = (0..700_u32)
        .map(|i| {
            Song::new(
                format!("t{i}"),
                "latin",
                2005,
                f64::from(i),
                FeatureVector::new([0.5, 0.5, 0.5, 0.5, 0.5, 100.0]),
            )
        })
        .collect();
    let recommender = Recommender::new(Arc::new(Catalog::new(songs)));
    let ranked = recommender
        .recommend(&query("latin", 2000, 2010, [0.5, 0.5, 0.5, 0.5, 0.5, 100.0]))
        .unwrap();

    assert_eq!(ranked.len(), 500);
    assert!(ranked.iter().all(|e| e.popularity >= 200.0));
    // Every distance ties, so rank order is popularity order.
    assert_eq!(ranked.entries()[0].track_id, "t699");
}

#[test]
fn test_repeat_evaluation_is_identical() {
    let mut session = Recommender::new(mixed_catalog()).session(6);
    let q = query("rock", 1960, 2019, [0.5, 0.5, 0.5, 0.5, 0.45, 125.01]);

    let first = session.evaluate_query(&q).unwrap();
    let second = session.evaluate_query(&q).unwrap();
    assert_eq!(first.results, second.results);
    assert_eq!(first.offset, 0);
    assert_eq!(second.offset, 0);
}

#[test]
fn test_pages_partition_results() {
    let mut session = Recommender::new(mixed_catalog()).session(6);
    let eval = session
        .evaluate_query(&query("jazz", 1960, 2019, [0.3, 0.3, 0.3, 0.3, 0.3, 90.0]))
        .unwrap();
    let len = eval.results.len();

    let mut seen = eval.page.clone();
    for k in 1.. {
        let page = session.advance_page();
        if page.is_empty() {
            break;
        }
        let start = k * 6;
        assert_eq!(page.as_slice(), &eval.results.entries()[start..(start + 6).min(len)]);
        seen.extend(page);
    }

    assert_eq!(seen.as_slice(), eval.results.entries());
    let offset = session.offset();
    assert!(session.advance_page().is_empty());
    assert_eq!(session.offset(), offset);
}

#[test]
fn test_any_field_change_resets_paging() {
    let base = query("hip hop", 1960, 2019, [0.5, 0.5, 0.5, 0.5, 0.45, 125.0]);

    let mut tempo = base.clone();
    tempo.features.set(AudioFeature::Tempo, 130.0);
    let mut genre = base.clone();
    genre.genre = "rock".to_string();
    let mut years = base.clone();
    years.years = YearRange::new(1961, 2019);

    for changed in [tempo, genre, years] {
        let mut session = Recommender::new(mixed_catalog()).session(6);
        session.evaluate_query(&base).unwrap();
        session.advance_page();
        assert_eq!(session.offset(), 6);

        let eval = session.evaluate_query(&changed).unwrap();
        assert_eq!(eval.offset, 0);
    }
}

#[test]
fn test_sessions_share_catalog_across_threads() {
    let recommender = Recommender::new(mixed_catalog());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let mut session: Session = recommender.session(6);
            thread::spawn(move || {
                session
                    .evaluate_query(&query("rock", 1960, 2019, [0.5; 6]))
                    .unwrap();
                for _ in 0..n {
                    session.advance_page();
                }
                session.offset()
            })
        })
        .collect();

    let offsets: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(offsets, vec![0, 6, 12, 18]);
}
