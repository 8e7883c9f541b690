use bevy::prelude::*;

/// Stable key for a drawable across frames
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawableId {
    Background,
    Player,
    Collectible,
    /// Keyed by arena slot so a reused slot reuses its presentation
    Trace(usize),
}

/// Geometry of a drawable primitive
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Cuboid { size: Vec3 },
    Plane { size: Vec2, normal: Dir3 },
}

/// Material of a drawable primitive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub color: Color,
    /// 1.0 is fully opaque
    pub opacity: f32,
    /// Unlit surfaces ignore scene lights
    pub unlit: bool,
}

impl Surface {
    pub fn lit(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            unlit: false,
        }
    }

    pub fn unlit(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            unlit: true,
        }
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { opacity, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drawable {
    pub id: DrawableId,
    pub shape: Shape,
    pub transform: Transform,
    pub surface: Surface,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient { color: Color, brightness: f32 },
    Point { position: Vec3 },
}

/// Complete, stateless description of one rendered frame
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub lights: Vec<Light>,
    pub drawables: Vec<Drawable>,
    pub camera: Transform,
}

impl Frame {
    pub fn drawable(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.iter().find(|drawable| drawable.id == id)
    }

    pub fn traces(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables
            .iter()
            .filter(|drawable| matches!(drawable.id, DrawableId::Trace(_)))
    }
}

/// Anything that can draw a frame
pub trait RenderSurface {
    fn present(&mut self, frame: &Frame);
}
