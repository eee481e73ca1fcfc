use catalog::{Catalog, Project};

/// One selector's value: the implicit "all" option or a concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterChoice {
    #[default]
    All,
    Value(String),
}

impl FilterChoice {
    pub fn value(v: impl Into<String>) -> Self {
        FilterChoice::Value(v.into())
    }
}

/// Current era/focus constraints narrowing the catalog to a working set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub era: FilterChoice,
    pub focus: FilterChoice,
}

impl FilterState {
    pub fn matches(&self, project: &Project) -> bool {
        let era_ok = match &self.era {
            FilterChoice::All => true,
            FilterChoice::Value(v) => &project.era == v,
        };
        let focus_ok = match &self.focus {
            FilterChoice::All => true,
            FilterChoice::Value(v) => project.focus.matches(v),
        };
        era_ok && focus_ok
    }
}

/// Camera effect returned from an operation. The map shell animates to the
/// coordinates; operations returning `None` must not move the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlyTo {
    pub coordinates: [f64; 2],
}

/// The one valid "current view" derived from {catalog, filters, selection}.
///
/// Invariant: `active_id()`, when set, references a project in the current
/// filtered list; every operation re-establishes this before returning.
///
/// Ordering contract:
/// - `filtered()` preserves catalog order.
/// - Default selection after a filter change is `filtered()[0]`, i.e. catalog
///   order, not timeline order.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    catalog: Catalog,
    filters: FilterState,
    active: Option<String>,
}

impl ViewState {
    /// Starts with both filters at "all" and nothing selected. The shell
    /// calls `apply_filters(false)` once to pick the initial project, same
    /// as any later filter change.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            filters: FilterState::default(),
            active: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active.as_deref().and_then(|id| self.catalog.get(id))
    }

    /// The working set under the current filters, in catalog order.
    pub fn filtered(&self) -> Vec<&Project> {
        self.catalog
            .projects()
            .iter()
            .filter(|p| self.filters.matches(p))
            .collect()
    }

    /// Status line shown above the grid.
    pub fn result_summary(&self) -> String {
        let n = self.filtered().len();
        match n {
            0 => "No projects match the current filters.".to_string(),
            1 => "Showing 1 project".to_string(),
            n => format!("Showing {n} projects"),
        }
    }

    /// Recomputes the working set and resolves the selection.
    ///
    /// - Empty result: active cleared, detail panel falls back to the
    ///   placeholder; no camera move.
    /// - `preserve_selection` and the active project survived the change:
    ///   keep it; no camera move.
    /// - Otherwise: the first filtered project (catalog order) becomes
    ///   active and the camera flies to it.
    pub fn apply_filters(&mut self, preserve_selection: bool) -> Option<FlyTo> {
        let filtered = self.filtered();

        if filtered.is_empty() {
            self.active = None;
            return None;
        }

        if preserve_selection
            && let Some(active) = self.active.as_deref()
            && filtered.iter().any(|p| p.id == active)
        {
            return None;
        }

        let first = filtered[0];
        let fly = FlyTo {
            coordinates: first.coordinates,
        };
        let id = first.id.clone();
        self.active = Some(id);
        Some(fly)
    }

    /// Makes `id` the active project and flies the camera to it.
    ///
    /// Idempotent: selecting the already-active project yields the same
    /// state (and the same recenter). An id outside the current filtered
    /// list is a no-op, which keeps the active-in-filtered invariant.
    pub fn select_project(&mut self, id: &str) -> Option<FlyTo> {
        let filtered = self.filtered();
        let project = filtered.iter().find(|p| p.id == id)?;
        let fly = FlyTo {
            coordinates: project.coordinates,
        };
        self.active = Some(project.id.clone());
        Some(fly)
    }

    /// Selector-change behavior: update the era, then re-filter while trying
    /// to keep the current selection.
    pub fn set_era(&mut self, choice: FilterChoice) -> Option<FlyTo> {
        self.filters.era = choice;
        self.apply_filters(true)
    }

    /// Selector-change behavior for the focus filter.
    pub fn set_focus(&mut self, choice: FilterChoice) -> Option<FlyTo> {
        self.filters.focus = choice;
        self.apply_filters(true)
    }

    /// Both selectors back to "all", then a fresh default selection.
    pub fn reset_filters(&mut self) -> Option<FlyTo> {
        self.filters = FilterState::default();
        self.apply_filters(false)
    }
}
