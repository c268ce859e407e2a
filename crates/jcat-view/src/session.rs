//! Browse session: the state behind the filter panel, the sort buttons and
//! the pager.
//!
//! # Supersession
//!
//! Searches may complete out of order (a slow first load, then a quick
//! re-query). [`Session::begin`] hands out a monotonically increasing
//! [`Ticket`] with each [`Query`]; only the completion carrying the most
//! recent ticket is applied by [`Session::complete`].

use jcat_core::query::InitialState;
use jcat_core::{DatasetId, Filters, Query, QueryError, SearchPage, SortField, SortSpec, StoreError};

/// Identifies one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: DatasetId,
    text: String,
    filters: Filters,
    sort: Option<SortSpec>,
    page: usize,
    /// Page count of the last applied result; bounds `next_page`.
    total_pages: usize,
    issued: u64,
}

impl Session {
    pub fn new(dataset: DatasetId) -> Self {
        Self {
            dataset,
            page: 1,
            total_pages: 1,
            ..Default::default()
        }
    }

    pub fn from_initial(initial: &InitialState) -> Self {
        let mut session = Self::new(initial.dataset);
        session.text = initial.text.clone();
        session
    }

    pub fn dataset(&self) -> DatasetId {
        self.dataset
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.trim().to_string();
        self.page = 1;
        tracing::debug!(text = %self.text, "session: text set");
    }

    /// Set one filter chip. The page returns to 1 even when the label is
    /// rejected.
    pub fn set_filter(&mut self, key: &str, label: &str) -> Result<(), QueryError> {
        self.page = 1;
        self.filters.set(key, label)?;
        tracing::debug!(key, label, "session: filter set");
        Ok(())
    }

    /// Select a dataset. The text is kept; filters and sort start over.
    pub fn switch_dataset(&mut self, dataset: DatasetId) {
        self.dataset = dataset;
        self.filters = Filters::default();
        self.sort = None;
        self.page = 1;
        self.total_pages = 1;
        tracing::debug!(%dataset, "session: dataset switched");
    }

    /// Clear text, filters and sort on the current dataset.
    pub fn reset(&mut self) {
        self.text.clear();
        self.filters = Filters::default();
        self.sort = None;
        self.page = 1;
        self.total_pages = 1;
        tracing::debug!(dataset = %self.dataset, "session: reset");
    }

    /// Press a sort button. See [`SortSpec::toggle`].
    pub fn toggle_sort(&mut self, field: SortField) -> SortSpec {
        let spec = SortSpec::toggle(self.sort, field);
        self.sort = Some(spec);
        self.page = 1;
        tracing::debug!(sort = %spec, "session: sort toggled");
        spec
    }

    /// Replace the sort outright, e.g. from a saved `label|dir` spec.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.page = 1;
    }

    /// Returns `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page >= self.total_pages {
            return false;
        }
        self.page += 1;
        true
    }

    /// Returns `false` when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Jump to a page. The engine clamps out-of-range values.
    pub fn go_to(&mut self, page: usize) {
        self.page = page;
    }

    pub fn query(&self) -> Query {
        Query::new(self.dataset)
            .text(&self.text)
            .filters(self.filters.clone())
            .sort(self.sort)
            .page(self.page)
    }

    /// Issue a new search, superseding any still in flight.
    pub fn begin(&mut self) -> (Ticket, Query) {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        tracing::debug!(ticket = self.issued, dataset = %self.dataset, page = self.page, "session: search issued");
        (ticket, self.query())
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply a finished search. Stale tickets are ignored and `false` is
    /// returned. A served page replaces the requested page with the clamped
    /// one; a failure leaves a single empty page.
    pub fn complete(&mut self, ticket: Ticket, result: &Result<SearchPage, StoreError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, current = self.issued, "session: stale result dropped");
            return false;
        }
        match result {
            Ok(page) => {
                self.page = page.page;
                self.total_pages = page.total_pages();
            }
            Err(e) => {
                tracing::warn!(error = %e, "session: search failed");
                self.page = 1;
                self.total_pages = 1;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
