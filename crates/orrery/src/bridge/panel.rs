//! JSON snapshots for the host page: the details panel, the view controls
//! and the system picker. Field names are camelCase for JavaScript.

use serde::Serialize;

use crate::core::scene::{BodyKind, CelestialBody, Detail};
use crate::renderer::projection::ViewMode;

/// What the details panel shows for the selected body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot<'a> {
    #[serde(rename = "type")]
    pub kind: BodyKind,
    pub name: &'a str,
    pub description: &'a str,
    pub details: &'a [Detail],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_planet: Option<&'a str>,
    /// `#RRGGBB`.
    pub color: String,
}

impl<'a> From<CelestialBody<'a>> for SelectionSnapshot<'a> {
    fn from(body: CelestialBody<'a>) -> Self {
        Self {
            kind: body.kind(),
            name: body.name(),
            description: body.description(),
            details: body.details(),
            parent_planet: body.parent_planet(),
            color: body.color().to_hex(),
        }
    }
}

/// Current camera state, for highlighting the active controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot<'a> {
    pub view_mode: ViewMode,
    pub zoom: f32,
    pub system: &'a str,
}

/// Systems the picker offers, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemList<'a> {
    pub systems: Vec<&'a str>,
    pub active: &'a str,
}
