use crate::state::ViewState;

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub id: String,
    pub years: String,
    pub title: String,
    /// The project's timeline note, falling back to its teaser.
    pub note: String,
    pub active: bool,
}

/// The timeline for the current working set.
///
/// Ordering contract: ascending `start_year`; equal years keep their
/// original catalog-relative order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimelineSnapshot {
    pub entries: Vec<TimelineEntry>,
}

pub fn extract(state: &ViewState) -> TimelineSnapshot {
    let active = state.active_id();
    let entries = catalog::timeline_order(&state.filtered())
        .iter()
        .map(|p| TimelineEntry {
            id: p.id.clone(),
            years: p.years.clone(),
            title: p.title.clone(),
            note: p.timeline_text().to_string(),
            active: active == Some(p.id.as_str()),
        })
        .collect();
    TimelineSnapshot { entries }
}

#[cfg(test)]
mod tests {
    use super::extract;
    use crate::state::ViewState;
    use catalog::{Catalog, Focus, Project, ProjectKind};
    use pretty_assertions::assert_eq;

    fn project(id: &str, start_year: i32, note: Option<&str>) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {id}"),
            teaser: format!("Teaser {id}"),
            summary: "s".to_string(),
            kind: ProjectKind::Excavation,
            era: "E".to_string(),
            focus: Focus::One("f".to_string()),
            years: format!("{start_year}"),
            start_year,
            location: "Campus".to_string(),
            coordinates: [0.0, 0.0],
            timeline_note: note.map(str::to_string),
            discoveries: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    #[test]
    fn entries_sort_by_start_year_stable() {
        let catalog = Catalog::from_projects(vec![
            project("late", 1950, None),
            project("early-a", 1890, None),
            project("early-b", 1890, None),
        ])
        .expect("catalog");
        let mut state = ViewState::new(catalog);
        state.apply_filters(false);

        let tl = extract(&state);
        let ids: Vec<&str> = tl.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early-a", "early-b", "late"]);
        // Active highlighting follows the selection, which stays in catalog
        // order: the first catalog project, not the first timeline entry.
        let active: Vec<&str> = tl
            .entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(active, vec!["late"]);
    }

    #[test]
    fn note_falls_back_to_teaser() {
        let catalog = Catalog::from_projects(vec![
            project("noted", 1900, Some("Dig season opens")),
            project("plain", 1910, None),
        ])
        .expect("catalog");
        let mut state = ViewState::new(catalog);
        state.apply_filters(false);

        let tl = extract(&state);
        assert_eq!(tl.entries[0].note, "Dig season opens");
        assert_eq!(tl.entries[1].note, "Teaser plain");
    }
}
