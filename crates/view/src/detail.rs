use crate::state::ViewState;

pub const PLACEHOLDER_TITLE: &str = "Choose a project";
pub const PLACEHOLDER_PROMPT: &str = "Use the map markers, timeline, or project list to learn \
     more about each field school, excavation, and laboratory investigation.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactItemView {
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactGroupView {
    pub category: String,
    pub items: Vec<ArtifactItemView>,
}

/// The detail panel: a placeholder when nothing is selected (terminal
/// "empty" display state), otherwise the active project's full write-up.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPanel {
    Placeholder {
        title: &'static str,
        prompt: &'static str,
    },
    Project {
        title: String,
        intro: String,
        /// Fixed row order: Type, Years, Era, Research focus, Location.
        meta: Vec<MetaRow>,
        summary: String,
        discoveries: Vec<String>,
        artifacts: Vec<ArtifactGroupView>,
    },
}

impl DetailPanel {
    pub fn placeholder() -> Self {
        DetailPanel::Placeholder {
            title: PLACEHOLDER_TITLE,
            prompt: PLACEHOLDER_PROMPT,
        }
    }
}

pub fn extract(state: &ViewState) -> DetailPanel {
    let Some(project) = state.active_project() else {
        return DetailPanel::placeholder();
    };

    let meta = vec![
        MetaRow {
            label: "Type",
            value: project.kind.label().to_string(),
        },
        MetaRow {
            label: "Years",
            value: project.years.clone(),
        },
        MetaRow {
            label: "Era",
            value: project.era.clone(),
        },
        MetaRow {
            label: "Research focus",
            value: project.focus.display(),
        },
        MetaRow {
            label: "Location",
            value: project.location.clone(),
        },
    ];

    let artifacts = project
        .artifacts
        .iter()
        .map(|group| ArtifactGroupView {
            category: group.category.clone(),
            items: group
                .items
                .iter()
                .map(|item| ArtifactItemView {
                    name: item.name().to_string(),
                    notes: item.notes().map(str::to_string),
                })
                .collect(),
        })
        .collect();

    DetailPanel::Project {
        title: project.title.clone(),
        intro: project.teaser.clone(),
        meta,
        summary: project.summary.clone(),
        discoveries: project.discoveries.clone(),
        artifacts,
    }
}
