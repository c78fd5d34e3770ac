use crate::error::SessionError;
use crate::event::SessionEvent;
use crate::selection::{Selection, SelectionPhase};
use crate::view::{NO_CATEGORY_PROMPT, NO_SELECTION_PROMPT, Overview, SelectionReport, SelectionView};
use analytics::{FilterOutcome, MetricsEngine, aggregate_by_category, aggregate_by_month, filter_records};
use core_types::Measure;
use dataset::RecordStore;
use rust_decimal::Decimal;

/// One user's view of a loaded dataset.
///
/// The store and the baseline margin are fixed at construction; only the
/// selection changes, and only through the methods below.
#[derive(Debug)]
pub struct Session {
    store: RecordStore,
    engine: MetricsEngine,
    categories: Vec<String>,
    baseline_margin_pct: Decimal,
    selection: Selection,
    available_sub_categories: Vec<String>,
}

impl Session {
    /// Starts a session on `store`.
    ///
    /// `preferred_category` is selected if the data contains it; otherwise the
    /// first category in source order is. An empty store starts with no category.
    pub fn new(store: RecordStore, preferred_category: Option<&str>) -> Result<Self, SessionError> {
        let engine = MetricsEngine::new();
        let baseline_margin_pct = engine.baseline_margin(store.records())?;
        let categories = store.categories();

        let mut session = Self {
            store,
            engine,
            categories,
            baseline_margin_pct,
            selection: Selection::default(),
            available_sub_categories: Vec::new(),
        };

        let initial = match preferred_category {
            Some(preferred) if session.categories.iter().any(|c| c == preferred) => {
                Some(preferred.to_string())
            }
            Some(preferred) => {
                tracing::warn!(
                    category = preferred,
                    "Configured default category is not in the dataset; using the first category."
                );
                session.categories.first().cloned()
            }
            None => session.categories.first().cloned(),
        };
        if let Some(category) = initial {
            session.select_category(&category)?;
        }

        tracing::info!(
            records = session.store.len(),
            categories = session.categories.len(),
            baseline_margin_pct = %session.baseline_margin_pct,
            "Session started."
        );
        Ok(session)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    /// Every category in the dataset, first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The sub-categories that may be selected within the current category.
    pub fn available_sub_categories(&self) -> &[String] {
        &self.available_sub_categories
    }

    pub fn baseline_margin_pct(&self) -> Decimal {
        self.baseline_margin_pct
    }

    /// Applies `event` and re-runs the pipeline.
    ///
    /// A rejected event leaves the selection unchanged.
    pub fn handle(&mut self, event: SessionEvent) -> Result<SelectionView, SessionError> {
        match event {
            SessionEvent::CategoryChanged(category) => self.select_category(&category)?,
            SessionEvent::SubCategoriesChanged(values) => self.set_sub_categories(values)?,
            SessionEvent::SubCategoryToggled(value) => self.toggle_sub_category(&value)?,
            SessionEvent::SelectionCleared => self.clear_sub_categories(),
        }
        self.evaluate()
    }

    /// Switches to `category`, keeping only the selected sub-categories that occur in it.
    pub fn select_category(&mut self, category: &str) -> Result<(), SessionError> {
        if !self.categories.iter().any(|c| c == category) {
            tracing::warn!(category, "Rejected unknown category.");
            return Err(SessionError::UnknownCategory(category.to_string()));
        }

        let available = self.store.sub_categories(category);
        let before = self.selection.sub_categories.len();
        self.selection
            .sub_categories
            .retain(|sub| available.iter().any(|a| a == sub));
        let dropped = before - self.selection.sub_categories.len();

        self.selection.category = Some(category.to_string());
        self.available_sub_categories = available;

        tracing::info!(category, dropped, "Category selected.");
        Ok(())
    }

    /// Replaces the selected sub-categories with `values`.
    pub fn set_sub_categories<I, S>(&mut self, values: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        for value in &values {
            self.ensure_available(value)?;
        }
        self.selection.sub_categories = values.into_iter().collect();
        tracing::debug!(selected = self.selection.sub_categories.len(), "Sub-categories replaced.");
        Ok(())
    }

    /// Adds `value` to the selection, or removes it if already selected.
    pub fn toggle_sub_category(&mut self, value: &str) -> Result<(), SessionError> {
        self.ensure_available(value)?;
        if !self.selection.sub_categories.remove(value) {
            self.selection.sub_categories.insert(value.to_string());
        }
        Ok(())
    }

    pub fn clear_sub_categories(&mut self) {
        self.selection.sub_categories.clear();
    }

    fn ensure_available(&self, value: &str) -> Result<(), SessionError> {
        let category = self
            .selection
            .category
            .as_ref()
            .ok_or(SessionError::NoCategorySelected)?;
        if self.available_sub_categories.iter().any(|a| a == value) {
            return Ok(());
        }
        tracing::warn!(category = %category, sub_category = value, "Rejected sub-category.");
        Err(SessionError::UnknownSubCategory {
            category: category.clone(),
            sub_category: value.to_string(),
        })
    }

    /// Runs Filter -> Aggregator -> Metrics Calculator for the current selection.
    ///
    /// With no sub-category selected the pipeline is suppressed and a prompt is
    /// returned instead of empty charts or zeroed metrics.
    pub fn evaluate(&self) -> Result<SelectionView, SessionError> {
        let category = match (self.selection.phase(), &self.selection.category) {
            (SelectionPhase::SubCategoriesSelected, Some(category)) => category,
            (SelectionPhase::NoCategory, _) => return Ok(SelectionView::no_selection(NO_CATEGORY_PROMPT)),
            _ => return Ok(SelectionView::no_selection(NO_SELECTION_PROMPT)),
        };

        let matched = match filter_records(self.store.records(), category, &self.selection.sub_categories) {
            FilterOutcome::NoSelection => return Ok(SelectionView::no_selection(NO_SELECTION_PROMPT)),
            FilterOutcome::Matched(records) => records,
        };

        let monthly_sales = aggregate_by_month(matched.iter().copied(), &[Measure::Sales])?;
        let metrics = self
            .engine
            .calculate(matched.iter().copied(), self.baseline_margin_pct)?;

        Ok(SelectionView::Report(SelectionReport {
            category: category.clone(),
            sub_categories: self.selection.sub_categories.iter().cloned().collect(),
            monthly_sales,
            metrics,
        }))
    }

    /// The unfiltered charts, independent of the selection.
    pub fn overview(&self) -> Result<Overview, SessionError> {
        let records = self.store.records();
        Ok(Overview {
            record_count: records.len(),
            category_totals: aggregate_by_category(records, &[Measure::Sales, Measure::Profit])?,
            monthly_sales: aggregate_by_month(records, &[Measure::Sales])?,
            baseline_margin_pct: self.baseline_margin_pct,
        })
    }
}
