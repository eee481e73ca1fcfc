use crate::state::ViewState;

/// One project card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub kind_label: &'static str,
    pub title: String,
    pub location: String,
    pub years: String,
    pub teaser: String,
    pub active: bool,
}

/// The card grid for the current working set.
///
/// Ordering contract: cards preserve catalog order (no sort).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub cards: Vec<CardView>,
}

pub fn extract(state: &ViewState) -> GridSnapshot {
    let active = state.active_id();
    let cards = state
        .filtered()
        .iter()
        .map(|p| CardView {
            id: p.id.clone(),
            kind_label: p.kind.label(),
            title: p.title.clone(),
            location: p.location.clone(),
            years: p.years.clone(),
            teaser: p.teaser.clone(),
            active: active == Some(p.id.as_str()),
        })
        .collect();
    GridSnapshot { cards }
}
