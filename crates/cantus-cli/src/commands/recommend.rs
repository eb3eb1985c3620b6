use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use cantus_core::model::Query;
use cantus_etl::Config;
use cantus_search::{RankedSong, Session};

use super::{format_query, open_recommender, write_page, QueryArgs};

/// One printed page, for `--json`.
#[derive(Debug, Serialize)]
struct PageOutput {
    offset: usize,
    songs: Vec<RankedSong>,
}

pub fn run_recommend(config: &Config, args: &QueryArgs, pages: u64, json: bool) -> Result<()> {
    let recommender = open_recommender(config)?;
    let mut session = recommender.session(config.page_size);
    let query = args.to_query();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        let output = collect_pages(&mut session, &query, pages)?;
        serde_json::to_writer_pretty(&mut out, &output)?;
        writeln!(out)?;
    } else {
        print_pages(&mut out, &mut session, &query, pages)?;
    }
    Ok(())
}

fn collect_pages(session: &mut Session, query: &Query, pages: u64) -> Result<Vec<PageOutput>> {
    let evaluation = session.evaluate_query(query)?;
    let mut output = Vec::new();
    if evaluation.page.is_empty() {
        return Ok(output);
    }
    output.push(PageOutput {
        offset: evaluation.offset,
        songs: evaluation.page,
    });

    for _ in 1..pages {
        let page = session.advance_page();
        if page.is_empty() {
            break;
        }
        output.push(PageOutput {
            offset: session.offset(),
            songs: page,
        });
    }
    Ok(output)
}

fn print_pages(
    out: &mut impl Write,
    session: &mut Session,
    query: &Query,
    pages: u64,
) -> Result<()> {
    let evaluation = session.evaluate_query(query)?;

    writeln!(out, "Query: {}", format_query(query))?;
    if evaluation.results.is_empty() {
        writeln!(out, "No matching songs")?;
        return Ok(());
    }
    writeln!(
        out,
        "{} candidates, {} per page\n",
        evaluation.results.len(),
        session.page_size()
    )?;
    write_page(out, &evaluation.page, evaluation.offset)?;

    for _ in 1..pages {
        let page = session.advance_page();
        if page.is_empty() {
            writeln!(out, "\nNo more songs")?;
            break;
        }
        writeln!(out)?;
        write_page(out, &page, session.offset())?;
    }
    Ok(())
}
