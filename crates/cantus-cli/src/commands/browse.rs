//! Interactive paging over recommendations.
//!
//! The loop keeps one committed query. Every command that changes it is
//! evaluated first and only committed if the session accepts it, so an
//! invalid edit leaves both the query and the current page untouched.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};

use cantus_core::model::{AudioFeature, Query, YearRange};
use cantus_etl::Config;
use cantus_search::Session;

use super::{format_query, open_recommender, write_page, QueryArgs};

const HELP: &str = "\
Commands:
  more                     next page
  genre <name>             change genre
  years <from> <to>        change release years
  set <feature> <value>    change an audio feature
  show                     print the current query and page
  help                     this text
  quit                     leave";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    More,
    Genre(String),
    Years(i32, i32),
    Set(AudioFeature, f64),
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<BrowseCommand>> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match word.to_lowercase().as_str() {
        "more" | "m" | "next" => BrowseCommand::More,
        "show" => BrowseCommand::Show,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "q" | "exit" => BrowseCommand::Quit,
        "genre" => {
            if rest.is_empty() {
                bail!("usage: genre <name>");
            }
            BrowseCommand::Genre(rest.to_string())
        }
        "years" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let [from, to] = parts.as_slice() else {
                bail!("usage: years <from> <to>");
            };
            BrowseCommand::Years(from.parse()?, to.parse()?)
        }
        "set" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let [name, value] = parts.as_slice() else {
                bail!("usage: set <feature> <value>");
            };
            let Some(feature) = AudioFeature::from_name(name) else {
                bail!(
                    "unknown feature '{name}' (expected one of: {})",
                    AudioFeature::ALL.map(AudioFeature::name).join(", ")
                );
            };
            BrowseCommand::Set(feature, value.parse()?)
        }
        other => bail!("unknown command '{other}', try 'help'"),
    };
    Ok(Some(command))
}

fn split_word(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    Some(match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    })
}

pub fn run_browse(config: &Config, args: &QueryArgs) -> Result<()> {
    let recommender = open_recommender(config)?;
    let session = recommender.session(config.page_size);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    browse(session, args.to_query(), stdin.lock(), stdout.lock())
}

/// Drive `session` from `input` until `quit` or end of input.
pub fn browse<R: BufRead, W: Write>(
    mut session: Session,
    mut query: Query,
    input: R,
    mut out: W,
) -> Result<()> {
    log::debug!("Browse session {} started", session.id());

    let evaluation = session.evaluate_query(&query)?;
    writeln!(out, "Query: {}", format_query(&query))?;
    show_page(&mut out, &session, evaluation.results.is_empty())?;
    writeln!(out, "\nType 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                writeln!(out, "{error}")?;
                continue;
            }
        };

        let candidate = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            BrowseCommand::Show => {
                writeln!(out, "Query: {}", format_query(&query))?;
                show_page(&mut out, &session, session.results().is_empty())?;
                continue;
            }
            BrowseCommand::More => {
                let page = session.advance_page();
                if page.is_empty() {
                    writeln!(out, "No more songs")?;
                } else {
                    write_page(&mut out, &page, session.offset())?;
                }
                continue;
            }
            BrowseCommand::Genre(genre) => Query { genre, ..query.clone() },
            BrowseCommand::Years(start, end) => Query {
                years: YearRange::new(start, end),
                ..query.clone()
            },
            BrowseCommand::Set(feature, value) => Query {
                features: query.features.with(feature, value),
                ..query.clone()
            },
        };

        match session.evaluate_query(&candidate) {
            Ok(evaluation) => {
                query = candidate;
                writeln!(out, "Query: {}", format_query(&query))?;
                show_page(&mut out, &session, evaluation.results.is_empty())?;
            }
            Err(error) => writeln!(out, "Rejected: {error}")?,
        }
    }

    Ok(())
}

fn show_page(out: &mut impl Write, session: &Session, no_matches: bool) -> Result<()> {
    if no_matches {
        writeln!(out, "No matching songs")?;
    } else if session.is_exhausted() {
        writeln!(out, "No more songs")?;
    } else {
        write_page(out, session.current_page(), session.offset())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantus_core::model::{FeatureVector, Song};
    use cantus_core::Catalog;
    use cantus_search::Recommender;
    use std::sync::Arc;

    fn session() -> Session {
        let catalog: Catalog = (0..10_u32)
            .map(|i| {
                let genre = if i % 2 == 0 { "rock" } else { "jazz" };
                Song::new(
                    format!("spotify:track:t{i}"),
                    genre,
                    2000,
                    f64::from(i),
                    FeatureVector::new([0.5, 0.5, 0.5, 0.5, 0.5, f64::from(i) * 10.0]),
                )
            })
            .collect();
        Recommender::new(Arc::new(catalog)).session(2)
    }

    fn query() -> Query {
        Query::new(
            "rock",
            YearRange::new(1990, 2010),
            FeatureVector::new([0.5, 0.5, 0.5, 0.5, 0.5, 0.0]),
        )
    }

    fn run(input: &str) -> String {
        let mut out = Vec::new();
        browse(session(), query(), input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(parse_command("more").unwrap(), Some(BrowseCommand::More));
        assert_eq!(
            parse_command("genre Dance Pop").unwrap(),
            Some(BrowseCommand::Genre("Dance Pop".to_string()))
        );
        assert_eq!(
            parse_command("years 1990 2000").unwrap(),
            Some(BrowseCommand::Years(1990, 2000))
        );
        assert_eq!(
            parse_command("set Tempo 120.5").unwrap(),
            Some(BrowseCommand::Set(AudioFeature::Tempo, 120.5))
        );
        assert_eq!(parse_command("QUIT").unwrap(), Some(BrowseCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_command("genre").is_err());
        assert!(parse_command("years 1990").is_err());
        assert!(parse_command("years a b").is_err());
        assert!(parse_command("set loudness 3").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_more_pages_until_exhausted() {
        let text = run("more\nmore\nmore\nquit\n");

        // Five rock songs, two per page: t0 t2 | t4 t6 | t8 | exhausted
        assert!(text.contains("   1. https://open.spotify.com/track/t0"));
        assert!(text.contains("   3. https://open.spotify.com/track/t4"));
        assert!(text.contains("   5. https://open.spotify.com/track/t8"));
        assert!(text.contains("No more songs"));
    }

    #[test]
    fn test_changing_genre_restarts_paging() {
        let text = run("more\ngenre jazz\nquit\n");
        assert!(text.contains("   1. https://open.spotify.com/track/t1"));
    }

    #[test]
    fn test_rejected_edit_keeps_query() {
        let text = run("more\nset energy 4\nshow\n");

        assert!(text.contains("Rejected:"));
        // `show` still prints the second page of the original query.
        let shown = text.rsplit("Query:").next().unwrap();
        assert!(shown.contains("energy=0.5"));
        assert!(shown.contains("   3. https://open.spotify.com/track/t4"));
    }

    #[test]
    fn test_no_matching_songs() {
        let text = run("genre polka\n");
        assert!(text.contains("No matching songs"));
    }
}
