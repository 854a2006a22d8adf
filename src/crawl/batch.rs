// src/crawl/batch.rs
// =============================================================================
// Runs the whole pipeline for many seed URLs at once.
//
// How it works:
// 1. Every seed URL becomes the root Page of its own crawl tree
//    (an invalid seed stops everything before any request is made)
// 2. Each tree is handed to its own tokio task, so independent trees are
//    crawled in parallel
// 3. Inside a task the page goes through try_fetch, try_analyze and
//    try_translate; a failure is logged on the page and the task carries on
//    with whatever step still makes sense
// 4. The finished pages come back in the order of the seeds. A task that
//    panics only costs its own tree: that seed comes back as a fresh page
//    with the panic in its failure log
//
// Trees never share anything except the (stateless) source and translator,
// each tree has its own seen-links set.
// =============================================================================

use crate::error::{Error, Result};
use crate::page::Page;
use crate::source::DocumentSource;
use crate::translate::Translator;
use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

// Crawls, analyzes and translates every seed
//
// Parameters:
//   seeds: the URLs to start from
//   max_depth: link hops to follow below each seed
//   source: where pages come from
//   translator: translates the headings of each tree
//
// Returns: one root Page per seed, in seed order
pub async fn run_all(
    seeds: &[String],
    max_depth: usize,
    source: Arc<dyn DocumentSource>,
    translator: Arc<dyn Translator>,
) -> Result<Vec<Page>> {
    let pages = seeds
        .iter()
        .map(|seed| Page::new(seed, max_depth))
        .collect::<Result<Vec<_>>>()?;

    let handles = pages.into_iter().map(|mut page| {
        let source = Arc::clone(&source);
        let translator = Arc::clone(&translator);

        tokio::spawn(async move {
            process(&mut page, source.as_ref(), translator.as_ref()).await;
            page
        })
    });

    join_all(handles)
        .await
        .into_iter()
        .zip(seeds)
        .map(|(joined, seed)| match joined {
            Ok(page) => Ok(page),
            Err(e) => {
                let mut page = Page::new(seed, max_depth)?;
                page.log_failure(Error::Worker(e.to_string()));
                Ok(page)
            }
        })
        .collect()
}

// Takes one tree through the pipeline without ever failing
async fn process(page: &mut Page, source: &dyn DocumentSource, translator: &dyn Translator) {
    info!("Crawling {} (max depth {})", page.link(), page.max_depth());

    page.try_fetch(source).await;
    page.try_analyze(source).await;
    page.try_translate(translator).await;

    info!(
        "Finished {} in state {}: {} link(s) discovered, {} broken, {} logged failure(s)",
        page.link(),
        page.state(),
        page.discovered_links().len(),
        page.broken_links().len(),
        page.failure_log().len()
    );
}
