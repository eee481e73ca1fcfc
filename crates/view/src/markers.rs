use catalog::ProjectKind;

use crate::state::ViewState;

/// One map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: String,
    pub kind: ProjectKind,
    pub title: String,
    /// `[lat, lng]`.
    pub coordinates: [f64; 2],
    pub active: bool,
}

/// Markers for the current working set, one per filtered project, in
/// catalog order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarkerSnapshot {
    pub markers: Vec<MarkerView>,
}

pub fn extract(state: &ViewState) -> MarkerSnapshot {
    let active = state.active_id();
    let markers = state
        .filtered()
        .iter()
        .map(|p| MarkerView {
            id: p.id.clone(),
            kind: p.kind,
            title: p.title.clone(),
            coordinates: p.coordinates,
            active: active == Some(p.id.as_str()),
        })
        .collect();
    MarkerSnapshot { markers }
}
