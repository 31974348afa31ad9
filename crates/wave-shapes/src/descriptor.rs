use crate::text::TextConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wave_core::Surface;

/// A buildable shape: the entries of the settings panel's shape dropdown
/// plus file imports. Each variant carries the parameters its controls edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShapeDescriptor {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Cube {
        width: f32,
        height: f32,
        depth: f32,
    },
    Disc {
        radius: f32,
        segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
    },
    #[serde(rename_all = "camelCase")]
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    Klein {
        scale: f32,
        slices: u32,
        stacks: u32,
    },
    /// SVG or OBJ (or plain text) file on disk, chosen by extension.
    File {
        path: PathBuf,
    },
}

impl ShapeDescriptor {
    pub fn text(text: impl Into<String>) -> Self {
        ShapeDescriptor::Text { text: text.into() }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        ShapeDescriptor::File { path: path.into() }
    }

    /// The built-in shapes with their default parameters, in panel order.
    pub fn catalog() -> Vec<ShapeDescriptor> {
        vec![
            ShapeDescriptor::text("Wazzuuup"),
            ShapeDescriptor::Cube {
                width: 0.5,
                height: 0.5,
                depth: 0.5,
            },
            ShapeDescriptor::Disc {
                radius: 0.3,
                segments: 64,
            },
            ShapeDescriptor::Cone {
                radius: 0.3,
                height: 0.6,
            },
            ShapeDescriptor::Cylinder {
                radius_top: 0.3,
                radius_bottom: 0.3,
                height: 0.5,
            },
            ShapeDescriptor::Klein {
                scale: 0.03,
                slices: 25,
                stacks: 25,
            },
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShapeDescriptor::Text { .. } => "text",
            ShapeDescriptor::Cube { .. } => "cube",
            ShapeDescriptor::Disc { .. } => "disc",
            ShapeDescriptor::Cone { .. } => "cone",
            ShapeDescriptor::Cylinder { .. } => "cylinder",
            ShapeDescriptor::Klein { .. } => "klein",
            ShapeDescriptor::File { .. } => "file",
        }
    }

    /// Build the surface. Importers and font rasterisation may be slow; use
    /// [`crate::spawn_build`] to keep them off the frame loop.
    pub fn build(&self) -> Result<Surface, String> {
        let surface = match self {
            ShapeDescriptor::Text { text } => crate::text::parse_text(text, &TextConfig::default())?,
            ShapeDescriptor::Cube {
                width,
                height,
                depth,
            } => crate::primitives::cuboid(*width, *height, *depth)?,
            ShapeDescriptor::Disc { radius, segments } => crate::primitives::disc(*radius, *segments)?,
            ShapeDescriptor::Cone { radius, height } => crate::primitives::cone(*radius, *height)?,
            ShapeDescriptor::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => crate::primitives::cylinder(*radius_top, *radius_bottom, *height)?,
            ShapeDescriptor::Klein {
                scale,
                slices,
                stacks,
            } => crate::parametric::klein(*scale, *slices, *stacks)?,
            ShapeDescriptor::File { path } => crate::file_parser::load_file(path)?,
        };

        if surface.is_empty() {
            return Err(format!("{} produced an empty surface", self.label()));
        }
        Ok(surface)
    }
}
