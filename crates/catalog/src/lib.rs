use serde::{Deserialize, Serialize};

/// Field activity kind shown on the map/timeline/grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Excavation,
    Survey,
    Lab,
}

impl ProjectKind {
    /// Human-facing label used on cards and in the detail panel.
    pub fn label(self) -> &'static str {
        match self {
            ProjectKind::Excavation => "Excavation",
            ProjectKind::Survey => "Survey",
            ProjectKind::Lab => "Laboratory",
        }
    }
}

/// Research focus: the wire format carries either a single theme string or an
/// array of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Focus {
    One(String),
    Many(Vec<String>),
}

impl Focus {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Focus::One(v) => v == value,
            Focus::Many(vs) => vs.iter().any(|v| v == value),
        }
    }

    /// All theme values carried by this focus, in declaration order.
    pub fn values(&self) -> &[String] {
        match self {
            Focus::One(v) => std::slice::from_ref(v),
            Focus::Many(vs) => vs,
        }
    }

    /// Display form: the single value, or the themes joined with ", ".
    pub fn display(&self) -> String {
        self.values().join(", ")
    }
}

/// One artifact inventory entry: a bare name or a name with notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtifactItem {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
}

impl ArtifactItem {
    pub fn name(&self) -> &str {
        match self {
            ArtifactItem::Name(n) => n,
            ArtifactItem::Detailed { name, .. } => name,
        }
    }

    pub fn notes(&self) -> Option<&str> {
        match self {
            ArtifactItem::Name(_) => None,
            ArtifactItem::Detailed { notes, .. } => notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactGroup {
    pub category: String,
    pub items: Vec<ArtifactItem>,
}

/// One archaeological field activity loaded from the static catalog.
///
/// Optional fields default so their absence never errors an extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub teaser: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub kind: ProjectKind,
    pub era: String,
    pub focus: Focus,
    pub years: String,
    pub start_year: i32,
    pub location: String,
    /// `[lat, lng]`, matching the wire payload and the map shell.
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discoveries: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactGroup>,
}

impl Project {
    /// Timeline copy: the dedicated note when present, the teaser otherwise.
    pub fn timeline_text(&self) -> &str {
        self.timeline_note.as_deref().unwrap_or(&self.teaser)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Parse(String),
    DuplicateId(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "catalog payload invalid: {msg}"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate project id: {id}"),
        }
    }
}

impl std::error::Error for CatalogError {}

// The payload is either a bare array of projects or wrapped in `{projects}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Wrapped { projects: Vec<Project> },
    Bare(Vec<Project>),
}

/// The full read-only collection of projects, loaded once at startup.
///
/// Ordering contract:
/// - `projects()` yields catalog order (payload order), never re-sorted.
/// - `eras()` / `focuses()` are distinct and lexicographically sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Parses a catalog payload, rejecting duplicate project ids.
    pub fn from_json(payload: &str) -> Result<Self, CatalogError> {
        let parsed: CatalogPayload =
            serde_json::from_str(payload).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let projects = match parsed {
            CatalogPayload::Wrapped { projects } => projects,
            CatalogPayload::Bare(projects) => projects,
        };
        Self::from_projects(projects)
    }

    pub fn from_projects(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut seen: Vec<&str> = Vec::with_capacity(projects.len());
        for p in &projects {
            if seen.contains(&p.id.as_str()) {
                return Err(CatalogError::DuplicateId(p.id.clone()));
            }
            seen.push(&p.id);
        }
        Ok(Self { projects })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Distinct eras present in the catalog, sorted. Selector options are
    /// these plus an implicit "all".
    pub fn eras(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for p in &self.projects {
            if !out.contains(&p.era) {
                out.push(p.era.clone());
            }
        }
        out.sort();
        out
    }

    /// Distinct focus/theme values present in the catalog, sorted.
    /// A multi-valued focus contributes each of its themes.
    pub fn focuses(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for p in &self.projects {
            for v in p.focus.values() {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
        }
        out.sort();
        out
    }
}

/// Returns `list` re-ordered for the timeline: ascending `start_year`, ties
/// keeping their original relative order.
pub fn timeline_order<'a>(list: &[&'a Project]) -> Vec<&'a Project> {
    let mut out = list.to_vec();
    out.sort_by_key(|p| p.start_year);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project(id: &str, era: &str, focus: Focus, start_year: i32) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {id}"),
            teaser: "teaser".to_string(),
            summary: "summary".to_string(),
            kind: ProjectKind::Excavation,
            era: era.to_string(),
            focus,
            years: "2020".to_string(),
            start_year,
            location: "North Quad".to_string(),
            coordinates: [38.6365, -90.2345],
            timeline_note: None,
            discoveries: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    #[test]
    fn parses_bare_array_and_wrapped_payloads() {
        let bare = r#"[{
            "id": "quad-1880",
            "title": "Quad Trenches",
            "teaser": "t",
            "summary": "s",
            "type": "excavation",
            "era": "Campus Founding",
            "focus": "Daily life",
            "years": "2019-2021",
            "startYear": 2019,
            "location": "North Quad",
            "coordinates": [38.6365, -90.2345]
        }]"#;
        let wrapped = format!(r#"{{"projects": {bare}}}"#);

        let a = Catalog::from_json(bare).expect("bare");
        let b = Catalog::from_json(&wrapped).expect("wrapped");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a.projects()[0].kind, ProjectKind::Excavation);
    }

    #[test]
    fn parse_rejects_duplicate_ids() {
        let p = project("dup", "A", Focus::One("x".into()), 2000);
        let err = Catalog::from_projects(vec![p.clone(), p]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("dup".to_string()));
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let payload = r#"[{
            "id": "x", "title": "x", "teaser": "t", "summary": "s",
            "type": "seance", "era": "A", "focus": "f",
            "years": "2020", "startYear": 2020,
            "location": "l", "coordinates": [0.0, 0.0]
        }]"#;
        assert!(matches!(
            Catalog::from_json(payload),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn focus_accepts_single_value_or_theme_array() {
        let one: Focus = serde_json::from_str(r#""Foodways""#).expect("one");
        let many: Focus = serde_json::from_str(r#"["Foodways", "Trade"]"#).expect("many");

        assert!(one.matches("Foodways"));
        assert!(!one.matches("Trade"));
        assert!(many.matches("Trade"));
        assert!(!many.matches("Ritual"));
        assert_eq!(many.display(), "Foodways, Trade");
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let payload = r#"[{
            "id": "x", "title": "x", "teaser": "t", "summary": "s",
            "type": "lab", "era": "A", "focus": "f",
            "years": "2020", "startYear": 2020,
            "location": "l", "coordinates": [1.0, 2.0]
        }]"#;
        let c = Catalog::from_json(payload).expect("parse");
        let p = &c.projects()[0];
        assert_eq!(p.timeline_note, None);
        assert!(p.discoveries.is_empty());
        assert!(p.artifacts.is_empty());
        assert_eq!(p.timeline_text(), "t");
    }

    #[test]
    fn artifact_items_parse_both_shapes() {
        let payload = r#"{"category": "Ceramics", "items": [
            "Whiteware sherd",
            {"name": "Clay pipe stem", "notes": "stamped"}
        ]}"#;
        let group: ArtifactGroup = serde_json::from_str(payload).expect("parse");
        assert_eq!(group.items[0].name(), "Whiteware sherd");
        assert_eq!(group.items[0].notes(), None);
        assert_eq!(group.items[1].name(), "Clay pipe stem");
        assert_eq!(group.items[1].notes(), Some("stamped"));
    }

    #[test]
    fn option_lists_are_distinct_and_sorted() {
        let c = Catalog::from_projects(vec![
            project("a", "Victorian", Focus::One("Trade".into()), 1990),
            project(
                "b",
                "Campus Founding",
                Focus::Many(vec!["Foodways".into(), "Trade".into()]),
                1995,
            ),
            project("c", "Victorian", Focus::One("Architecture".into()), 2000),
        ])
        .expect("catalog");

        assert_eq!(c.eras(), vec!["Campus Founding", "Victorian"]);
        assert_eq!(c.focuses(), vec!["Architecture", "Foodways", "Trade"]);
    }

    #[test]
    fn timeline_order_is_stable_among_equal_years() {
        let a = project("a", "E", Focus::One("f".into()), 1912);
        let b = project("b", "E", Focus::One("f".into()), 1890);
        let c = project("c", "E", Focus::One("f".into()), 1912);
        let list = [&a, &b, &c];

        let ordered = timeline_order(&list);
        let ids: Vec<&str> = ordered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
