// src/page/webpage.rs
// =============================================================================
// A Page is one URL and everything the crawler learned about it.
//
// Lifecycle (see state.rs):
//   fetch     - downloads the document              Initialized -> Fetched
//   analyze   - extracts headings/links and crawls  Fetched     -> Analyzed
//               the children, depth first
//   translate - translates the headings of the      Analyzed    -> Translated
//               whole tree in one batch
//
// Calling an operation in the wrong state fails with IllegalStateTransition
// and leaves the page untouched. A failed fetch or translate also leaves
// the page in its previous state.
//
// Every operation has a try_ twin that records the error in the page's
// failure log instead of returning it, so a batch of pages can keep going
// when one of them fails.
// =============================================================================

use super::{Heading, Link, PageState, SeenLinks};
use crate::error::{Error, Result};
use crate::source::{Document, DocumentSource};
use crate::translate::{Translation, Translator};
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info, warn};

/// Language shown in the report before the page is translated
pub const UNKNOWN_LANGUAGE: &str = "UNKNOWN";

// What a page holds in each state
#[derive(Debug)]
enum Stage {
    Initialized,
    Fetched(Document),
    Analyzed(Analysis),
    Translated(Analysis),
}

// The result of analyze()
#[derive(Debug, Default)]
struct Analysis {
    headings: Vec<Heading>,
    discovered_links: Vec<Link>,
    broken_links: Vec<Link>,
    children: Vec<Page>,
}

#[derive(Debug)]
pub struct Page {
    link: Link,
    depth: usize,
    max_depth: usize,
    // Only the root of a tree owns the set, descendants borrow it
    seen_links: Option<SeenLinks>,
    stage: Stage,
    source_language: String,
    target_language: String,
    failure_log: Vec<Error>,
}

impl Page {
    // Creates the root page of a new crawl tree
    //
    // Parameters:
    //   url: the page to start from (must be an absolute URL)
    //   max_depth: how many link hops below the root get crawled
    //              (0 = only the root itself)
    pub fn new(url: &str, max_depth: usize) -> Result<Self> {
        let link = Link::parse(url)?;

        let mut seen_links = SeenLinks::new();
        seen_links.insert(link.clone());

        Ok(Self {
            seen_links: Some(seen_links),
            ..Self::child(link, 0, max_depth)
        })
    }

    fn child(link: Link, depth: usize, max_depth: usize) -> Self {
        Self {
            link,
            depth,
            max_depth,
            seen_links: None,
            stage: Stage::Initialized,
            source_language: UNKNOWN_LANGUAGE.to_string(),
            target_language: UNKNOWN_LANGUAGE.to_string(),
            failure_log: Vec::new(),
        }
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn state(&self) -> PageState {
        match self.stage {
            Stage::Initialized => PageState::Initialized,
            Stage::Fetched(_) => PageState::Fetched,
            Stage::Analyzed(_) => PageState::Analyzed,
            Stage::Translated(_) => PageState::Translated,
        }
    }

    fn analysis(&self) -> Option<&Analysis> {
        match &self.stage {
            Stage::Analyzed(analysis) | Stage::Translated(analysis) => Some(analysis),
            Stage::Initialized | Stage::Fetched(_) => None,
        }
    }

    /// This page's own headings (empty until analyzed)
    pub fn headings(&self) -> &[Heading] {
        self.analysis()
            .map(|a| a.headings.as_slice())
            .unwrap_or_default()
    }

    /// Links found on this page that no other page of the tree had claimed
    pub fn discovered_links(&self) -> &[Link] {
        self.analysis()
            .map(|a| a.discovered_links.as_slice())
            .unwrap_or_default()
    }

    /// Discovered links whose page could not be fetched
    pub fn broken_links(&self) -> &[Link] {
        self.analysis()
            .map(|a| a.broken_links.as_slice())
            .unwrap_or_default()
    }

    pub fn children(&self) -> &[Page] {
        self.analysis()
            .map(|a| a.children.as_slice())
            .unwrap_or_default()
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Errors recorded by the try_ operations, oldest first
    pub fn failure_log(&self) -> &[Error] {
        &self.failure_log
    }

    fn illegal_transition(&self, operation: &'static str, required: PageState) -> Error {
        Error::IllegalStateTransition {
            operation,
            required,
            actual: self.state(),
        }
    }

    fn require(&self, operation: &'static str, required: PageState) -> Result<()> {
        if self.state() == required {
            Ok(())
        } else {
            Err(self.illegal_transition(operation, required))
        }
    }

    // -------------------------------------------------------------------------
    // fetch: Initialized -> Fetched
    // -------------------------------------------------------------------------

    pub async fn fetch(&mut self, source: &dyn DocumentSource) -> Result<()> {
        self.require("fetch", PageState::Initialized)?;

        debug!("Fetching [depth {}]: {}", self.depth, self.link);
        let document = source.get_document(&self.link.to_string()).await?;

        self.stage = Stage::Fetched(document);
        Ok(())
    }

    pub async fn try_fetch(&mut self, source: &dyn DocumentSource) {
        let result = self.fetch(source).await;
        self.record(result);
    }

    // -------------------------------------------------------------------------
    // analyze: Fetched -> Analyzed
    // -------------------------------------------------------------------------

    pub async fn analyze(&mut self, source: &dyn DocumentSource) -> Result<()> {
        self.require("analyze", PageState::Fetched)?;

        let mut seen_links = self.seen_links.take().unwrap_or_default();
        let result = self.analyze_within(source, &mut seen_links).await;
        self.seen_links = Some(seen_links);

        result
    }

    pub async fn try_analyze(&mut self, source: &dyn DocumentSource) {
        let result = self.analyze(source).await;
        self.record(result);
    }

    // Extracts this page's headings and links, then crawls the links
    //
    // Steps:
    // 1. headings come straight from the document, in document order
    // 2. links already seen anywhere in the tree are dropped silently
    // 3. the remaining links are claimed in the tree's seen set
    // 4. below max_depth every remaining link becomes a child page that is
    //    fetched and analyzed before the next one starts, so siblings see
    //    each other's claims; a child that fails becomes a broken link
    //
    // Boxed because it recurses through the children.
    fn analyze_within<'a>(
        &'a mut self,
        source: &'a dyn DocumentSource,
        seen_links: &'a mut SeenLinks,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            let document = match &mut self.stage {
                Stage::Fetched(document) => std::mem::take(document),
                _ => return Err(self.illegal_transition("analyze", PageState::Fetched)),
            };

            seen_links.insert(self.link.clone());

            let mut discovered_links: Vec<Link> = Vec::new();
            for link in document.links {
                if !seen_links.contains(&link) && !discovered_links.contains(&link) {
                    discovered_links.push(link);
                }
            }

            for link in &discovered_links {
                seen_links.insert(link.clone());
            }

            let mut analysis = Analysis {
                headings: document.headings,
                discovered_links,
                ..Analysis::default()
            };

            if self.depth < self.max_depth {
                for link in &analysis.discovered_links {
                    let mut child = Page::child(link.clone(), self.depth + 1, self.max_depth);

                    match child.expand(source, seen_links).await {
                        Ok(()) => analysis.children.push(child),
                        Err(e) => {
                            warn!("Broken link on {}: {} ({})", self.link, link, e);
                            analysis.broken_links.push(link.to_broken());
                        }
                    }
                }
            }

            debug!(
                "Analyzed {}: {} heading(s), {} new link(s), {} child page(s), {} broken",
                self.link,
                analysis.headings.len(),
                analysis.discovered_links.len(),
                analysis.children.len(),
                analysis.broken_links.len()
            );

            self.stage = Stage::Analyzed(analysis);
            Ok(())
        }
        .boxed()
    }

    async fn expand(
        &mut self,
        source: &dyn DocumentSource,
        seen_links: &mut SeenLinks,
    ) -> Result<()> {
        self.fetch(source).await?;
        self.analyze_within(source, seen_links).await
    }

    // -------------------------------------------------------------------------
    // translate: Analyzed -> Translated
    // -------------------------------------------------------------------------

    // Translates the headings of this page and all its descendants
    //
    // The headings are flattened depth first (this page, then each child's
    // subtree in order), translated in a single call, and handed back in
    // that same order: every page takes as many texts as it has headings.
    pub async fn translate(&mut self, translator: &dyn Translator) -> Result<()> {
        self.require("translate", PageState::Analyzed)?;

        let mut texts = Vec::new();
        self.aggregate_heading_texts(&mut texts);

        let translation = if texts.is_empty() {
            Translation::empty(translator.target_language())
        } else {
            info!("Translating {} heading(s) of {}", texts.len(), self.link);
            translator.translate(&texts).await?
        };

        if translation.texts.len() != texts.len() {
            return Err(Error::HeadingCountMismatch {
                expected: texts.len(),
                actual: translation.texts.len(),
            });
        }

        let source_language = translation.source_language.to_string();
        let target_language = translation.target_language.to_string();
        let mut translated = translation.texts.into_iter();

        self.redistribute(&mut translated, &source_language, &target_language);

        Ok(())
    }

    pub async fn try_translate(&mut self, translator: &dyn Translator) {
        let result = self.translate(translator).await;
        self.record(result);
    }

    fn aggregate_heading_texts(&self, texts: &mut Vec<String>) {
        texts.extend(self.headings().iter().map(|h| h.text().to_string()));

        for child in self.children() {
            child.aggregate_heading_texts(texts);
        }
    }

    // Consumes the translated texts in the order aggregate_heading_texts
    // produced them. The caller has checked that the lengths match.
    fn redistribute<I>(&mut self, translated: &mut I, source_language: &str, target_language: &str)
    where
        I: Iterator<Item = String>,
    {
        self.source_language = source_language.to_string();
        self.target_language = target_language.to_string();

        let stage = std::mem::replace(&mut self.stage, Stage::Initialized);
        self.stage = match stage {
            Stage::Analyzed(mut analysis) => {
                analysis.headings = analysis
                    .headings
                    .iter()
                    .zip(translated.by_ref())
                    .map(|(heading, text)| heading.with_text(text))
                    .collect();

                for child in &mut analysis.children {
                    child.redistribute(&mut *translated, source_language, target_language);
                }

                Stage::Translated(analysis)
            }
            other => other,
        };
    }

    // -------------------------------------------------------------------------

    fn record(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.log_failure(e);
        }
    }

    /// Appends an error to the failure log without touching the state
    pub fn log_failure(&mut self, error: Error) {
        warn!("{}: {}", self.link, error);
        self.failure_log.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Level;
    use crate::testing::{Behavior, FakeSource, FakeTranslator};
    use std::collections::HashSet;

    const SEED: &str = "https://testpage/index.html";

    fn h(level: Level, text: &str) -> Heading {
        Heading::new(level, text)
    }

    // index -> a, b, index (revisit), missing (broken)
    // a -> b, c
    // b -> a
    fn site() -> FakeSource {
        FakeSource::new()
            .with_page(
                SEED,
                vec![h(Level::H1, "Index"), h(Level::H2, "Intro")],
                &[
                    "https://testpage/a.html",
                    "https://testpage/b.html",
                    "https://testpage/index.html#top",
                    "https://testpage/missing.html",
                ],
            )
            .with_page(
                "https://testpage/a.html",
                vec![h(Level::H1, "A")],
                &["https://testpage/b.html", "https://testpage/c.html"],
            )
            .with_page(
                "https://testpage/b.html",
                vec![h(Level::H1, "B"), h(Level::H3, "B detail")],
                &["https://testpage/a.html"],
            )
            .with_page("https://testpage/c.html", vec![], &[])
    }

    async fn analyzed(source: &FakeSource, max_depth: usize) -> Page {
        let mut page = Page::new(SEED, max_depth).unwrap();
        page.fetch(source).await.unwrap();
        page.analyze(source).await.unwrap();
        page
    }

    fn walk<'a>(page: &'a Page, out: &mut Vec<&'a Page>) {
        out.push(page);
        for child in page.children() {
            walk(child, out);
        }
    }

    #[test]
    fn test_new_page_defaults() {
        let page = Page::new(SEED, 2).unwrap();
        assert_eq!(page.state(), PageState::Initialized);
        assert_eq!(page.depth(), 0);
        assert_eq!(page.max_depth(), 2);
        assert_eq!(page.source_language(), UNKNOWN_LANGUAGE);
        assert_eq!(page.target_language(), UNKNOWN_LANGUAGE);
        assert!(page.headings().is_empty());
        assert!(page.failure_log().is_empty());
    }

    #[test]
    fn test_new_page_rejects_invalid_url() {
        assert!(matches!(Page::new("not a url", 2), Err(Error::InvalidLink { .. })));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let source = site();
        let translator = FakeTranslator::new(Behavior::Prefix);
        let mut page = Page::new(SEED, 2).unwrap();

        page.fetch(&source).await.unwrap();
        assert_eq!(page.state(), PageState::Fetched);

        page.analyze(&source).await.unwrap();
        assert_eq!(page.state(), PageState::Analyzed);

        page.translate(&translator).await.unwrap();
        assert_eq!(page.state(), PageState::Translated);
        assert_eq!(page.source_language(), "german");
        assert_eq!(page.target_language(), "english");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_initialized() {
        let source = FakeSource::new();
        let mut page = Page::new(SEED, 2).unwrap();

        let result = page.fetch(&source).await;

        assert!(matches!(result, Err(Error::Fetch { .. })));
        assert_eq!(page.state(), PageState::Initialized);
    }

    #[tokio::test]
    async fn test_illegal_transitions_leave_page_untouched() {
        let source = site();
        let translator = FakeTranslator::new(Behavior::Prefix);

        // Initialized
        let mut page = Page::new(SEED, 1).unwrap();
        assert!(matches!(
            page.analyze(&source).await,
            Err(Error::IllegalStateTransition { required: PageState::Fetched, actual: PageState::Initialized, .. })
        ));
        assert!(matches!(
            page.translate(&translator).await,
            Err(Error::IllegalStateTransition { required: PageState::Analyzed, .. })
        ));
        assert_eq!(page.state(), PageState::Initialized);

        // Fetched
        page.fetch(&source).await.unwrap();
        assert!(matches!(page.fetch(&source).await, Err(Error::IllegalStateTransition { .. })));
        assert!(matches!(page.translate(&translator).await, Err(Error::IllegalStateTransition { .. })));
        assert_eq!(page.state(), PageState::Fetched);

        // Analyzed
        page.analyze(&source).await.unwrap();
        let headings = page.headings().to_vec();
        let children = page.children().len();
        assert!(matches!(page.fetch(&source).await, Err(Error::IllegalStateTransition { .. })));
        assert!(matches!(page.analyze(&source).await, Err(Error::IllegalStateTransition { .. })));
        assert_eq!(page.state(), PageState::Analyzed);
        assert_eq!(page.headings(), headings.as_slice());
        assert_eq!(page.children().len(), children);

        // Translated
        page.translate(&translator).await.unwrap();
        assert!(matches!(page.fetch(&source).await, Err(Error::IllegalStateTransition { .. })));
        assert!(matches!(page.analyze(&source).await, Err(Error::IllegalStateTransition { .. })));
        assert!(matches!(page.translate(&translator).await, Err(Error::IllegalStateTransition { .. })));
        assert_eq!(page.state(), PageState::Translated);
        assert_eq!(translator.calls(), 1);
    }

    #[tokio::test]
    async fn test_seed_with_revisit_and_broken_link() {
        let source = FakeSource::new()
            .with_page(
                SEED,
                vec![h(Level::H1, "Index")],
                &[
                    "https://testpage/a.html",
                    "https://testpage/index.html",
                    "https://testpage/missing.html",
                ],
            )
            .with_page("https://testpage/a.html", vec![], &[]);

        let page = analyzed(&source, 1).await;

        assert_eq!(page.children().len(), 1);
        assert_eq!(page.broken_links().len(), 1);
        assert_eq!(
            page.broken_links()[0],
            Link::parse("https://testpage/missing.html").unwrap().to_broken()
        );

        let seed = Link::parse(SEED).unwrap();
        assert!(!page.discovered_links().contains(&seed));
        assert_eq!(page.discovered_links().len(), 2);
    }

    #[tokio::test]
    async fn test_every_discovered_link_is_accounted_for() {
        let source = site();
        let page = analyzed(&source, 2).await;

        let mut pages = Vec::new();
        walk(&page, &mut pages);

        for page in pages.iter().filter(|p| p.depth() < p.max_depth()) {
            assert_eq!(
                page.children().len() + page.broken_links().len(),
                page.discovered_links().len(),
                "unaccounted links on {}",
                page.link()
            );
        }
    }

    #[tokio::test]
    async fn test_no_link_is_fetched_twice() {
        let source = site();
        let page = analyzed(&source, 3).await;

        let requests = source.requests();
        let unique: HashSet<&String> = requests.iter().collect();
        assert_eq!(unique.len(), requests.len(), "duplicate fetches: {:?}", requests);

        // Every link shows up at most once as a page link or discovered link
        let mut pages = Vec::new();
        walk(&page, &mut pages);
        let mut claimed = HashSet::new();
        assert!(claimed.insert(page.link().clone()));
        for page in &pages {
            for link in page.discovered_links() {
                assert!(claimed.insert(link.clone()), "{} claimed twice", link);
            }
        }
    }

    #[tokio::test]
    async fn test_siblings_see_each_others_links() {
        // The root claims a and b; a is crawled first and claims c, so b's
        // link back to a is dropped silently
        let source = site();
        let page = analyzed(&source, 2).await;

        let a = &page.children()[0];
        let b = &page.children()[1];
        assert_eq!(a.link().to_string(), "https://testpage/a.html");
        assert_eq!(b.link().to_string(), "https://testpage/b.html");

        let a_links: Vec<String> = a.discovered_links().iter().map(|l| l.to_string()).collect();
        assert_eq!(a_links, vec!["https://testpage/c.html"]);
        assert!(b.discovered_links().is_empty());
        assert!(b.broken_links().is_empty());
    }

    #[tokio::test]
    async fn test_depth_boundary() {
        let source = site();
        let page = analyzed(&source, 0).await;

        assert!(!page.discovered_links().is_empty());
        assert!(page.children().is_empty());
        assert!(page.broken_links().is_empty());
        assert_eq!(source.requests(), vec![SEED.to_string()]);
    }

    #[tokio::test]
    async fn test_children_at_max_depth_are_not_expanded() {
        let source = site();
        let page = analyzed(&source, 1).await;

        for child in page.children() {
            assert_eq!(child.depth(), 1);
            assert_eq!(child.state(), PageState::Analyzed);
            assert!(child.children().is_empty());
        }
    }

    #[tokio::test]
    async fn test_translation_batch_order() {
        let source = FakeSource::new()
            .with_page(
                SEED,
                vec![h(Level::H1, "root 1"), h(Level::H2, "root 2")],
                &["https://testpage/child.html"],
            )
            .with_page("https://testpage/child.html", vec![h(Level::H3, "child 1")], &[]);
        let translator = FakeTranslator::new(Behavior::Prefix);

        let mut page = analyzed(&source, 1).await;
        page.translate(&translator).await.unwrap();

        assert_eq!(translator.calls(), 1);
        assert_eq!(translator.batches()[0], vec!["root 1", "root 2", "child 1"]);

        assert_eq!(
            page.headings(),
            &[h(Level::H1, "translated: root 1"), h(Level::H2, "translated: root 2")]
        );
        let child = &page.children()[0];
        assert_eq!(child.headings(), &[h(Level::H3, "translated: child 1")]);
        assert_eq!(child.state(), PageState::Translated);
        assert_eq!(child.source_language(), "german");
        assert_eq!(child.target_language(), "english");
    }

    #[tokio::test]
    async fn test_identity_translation_preserves_structure() {
        let source = site();
        let translator = FakeTranslator::new(Behavior::Identity);

        let mut page = analyzed(&source, 3).await;
        let mut before = Vec::new();
        walk(&page, &mut before);
        let before: Vec<Vec<Heading>> = before.iter().map(|p| p.headings().to_vec()).collect();

        page.translate(&translator).await.unwrap();

        let mut after = Vec::new();
        walk(&page, &mut after);
        let after: Vec<Vec<Heading>> = after.iter().map(|p| p.headings().to_vec()).collect();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_empty_tree_skips_translation_service() {
        let source = FakeSource::new()
            .with_page(SEED, vec![], &["https://testpage/child.html"])
            .with_page("https://testpage/child.html", vec![], &[]);
        let translator = FakeTranslator::new(Behavior::Prefix);

        let mut page = analyzed(&source, 1).await;
        page.translate(&translator).await.unwrap();

        assert_eq!(translator.calls(), 0);
        assert_eq!(page.source_language(), "english");
        assert_eq!(page.target_language(), "english");
        let child = &page.children()[0];
        assert_eq!(child.source_language(), "english");
        assert_eq!(child.target_language(), "english");
    }

    #[tokio::test]
    async fn test_failed_translation_keeps_analyzed() {
        let source = site();
        let translator = FakeTranslator::new(Behavior::Fail);

        let mut page = analyzed(&source, 1).await;
        let headings = page.headings().to_vec();
        let result = page.translate(&translator).await;

        assert!(matches!(result, Err(Error::Translation(_))));
        assert_eq!(page.state(), PageState::Analyzed);
        assert_eq!(page.headings(), headings.as_slice());
        assert_eq!(page.source_language(), UNKNOWN_LANGUAGE);
    }

    #[tokio::test]
    async fn test_short_translation_fails_loudly() {
        let source = site();
        let translator = FakeTranslator::new(Behavior::DropLast);

        let mut page = analyzed(&source, 2).await;
        let result = page.translate(&translator).await;

        assert!(matches!(
            result,
            Err(Error::HeadingCountMismatch { expected: 5, actual: 4 })
        ));
        assert_eq!(page.state(), PageState::Analyzed);
        assert_eq!(page.headings()[0], h(Level::H1, "Index"));
    }

    #[tokio::test]
    async fn test_try_operations_log_instead_of_failing() {
        let source = FakeSource::new();
        let translator = FakeTranslator::new(Behavior::Prefix);
        let mut page = Page::new(SEED, 2).unwrap();

        page.try_fetch(&source).await;
        page.try_analyze(&source).await;
        page.try_translate(&translator).await;

        assert_eq!(page.state(), PageState::Initialized);
        assert_eq!(page.failure_log().len(), 3);
        assert!(matches!(page.failure_log()[0], Error::Fetch { .. }));
        assert!(matches!(page.failure_log()[1], Error::IllegalStateTransition { .. }));
        assert!(matches!(page.failure_log()[2], Error::IllegalStateTransition { .. }));
    }

    #[tokio::test]
    async fn test_try_operations_advance_on_success() {
        let source = site();
        let translator = FakeTranslator::new(Behavior::Prefix);
        let mut page = Page::new(SEED, 1).unwrap();

        page.try_fetch(&source).await;
        page.try_analyze(&source).await;
        page.try_translate(&translator).await;

        assert_eq!(page.state(), PageState::Translated);
        assert!(page.failure_log().is_empty());
    }
}
