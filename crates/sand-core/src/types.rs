//! Core type definitions for the simulation.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grid coordinate: `x` is the column, `y` is the row (row 0 is the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }

    /// Grid coordinate containing the given pixel. Floors toward negative
    /// infinity so pixels left of or above the origin stay out of bounds.
    pub fn from_pixels(pixel_x: i32, pixel_y: i32, cell_size: u32) -> Self {
        let size = cell_size as i32;
        Self {
            x: pixel_x.div_euclid(size),
            y: pixel_y.div_euclid(size),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Neighbor scan order used by reactions and the dog.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// The closed set of substances a cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Default,
    Sand,
    Water,
    Lava,
    Rock,
    Vapor,
    Dog,
}

impl Material {
    pub fn all() -> [Material; 7] {
        [
            Material::Default,
            Material::Sand,
            Material::Water,
            Material::Lava,
            Material::Rock,
            Material::Vapor,
            Material::Dog,
        ]
    }

    /// Materials an end user can pick for placement
    pub fn selectable() -> [Material; 5] {
        [
            Material::Sand,
            Material::Water,
            Material::Lava,
            Material::Rock,
            Material::Vapor,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Material::Default => "default",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Lava => "lava",
            Material::Rock => "rock",
            Material::Vapor => "vapor",
            Material::Dog => "dog",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Material::all()
            .into_iter()
            .find(|m| m.name() == lowered)
            .ok_or_else(|| Error::UnknownMaterial(s.to_string()))
    }
}

/// Render color; `a` is opacity in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channel-wise linear interpolation, floored. `t` is expected in [0, 1).
    pub fn lerp(from: Color, to: Color, t: f64) -> Self {
        let channel = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).floor() as u8;
        Self {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: from.a,
        }
    }

    /// CSS representation: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// An occupied grid slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub material: Material,
    pub color: Color,
    /// Remaining ticks before a vapor cell condenses. `None` for everything else.
    pub lifetime: Option<u32>,
}

impl Cell {
    pub fn new(material: Material, color: Color) -> Self {
        Self {
            material,
            color,
            lifetime: None,
        }
    }

    pub fn with_lifetime(mut self, lifetime: u32) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    pub fn is(&self, material: Material) -> bool {
        self.material == material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_pixels() {
        assert_eq!(Position::from_pixels(0, 0, 10), Position::new(0, 0));
        assert_eq!(Position::from_pixels(159, 150, 10), Position::new(15, 15));
        assert_eq!(Position::from_pixels(-1, 5, 10), Position::new(-1, 0));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.to_delta(), (0, -1));
        assert_eq!(Direction::Down.to_delta(), (0, 1));
        assert_eq!(Direction::Left.to_delta(), (-1, 0));
        assert_eq!(Direction::Right.to_delta(), (1, 0));
        assert_eq!(Position::new(2, 2).step(Direction::Up), Position::new(2, 1));
    }

    #[test]
    fn test_material_parse() {
        assert_eq!("sand".parse::<Material>().unwrap(), Material::Sand);
        assert_eq!(" Lava ".parse::<Material>().unwrap(), Material::Lava);
        assert!(matches!(
            "plasma".parse::<Material>(),
            Err(Error::UnknownMaterial(_))
        ));
    }

    #[test]
    fn test_selectable_excludes_programmatic_materials() {
        let selectable = Material::selectable();
        assert!(!selectable.contains(&Material::Dog));
        assert!(!selectable.contains(&Material::Default));
    }

    #[test]
    fn test_color_lerp_and_css() {
        let light = Color::rgb(244, 200, 96);
        let dark = Color::rgb(139, 69, 19);
        assert_eq!(Color::lerp(light, dark, 0.0), light);
        assert_eq!(Color::lerp(light, dark, 0.5), Color::rgb(191, 134, 57));
        assert_eq!(light.to_css(), "#f4c860");
        assert_eq!(
            Color::rgba(200, 200, 200, 0.5).to_css(),
            "rgba(200, 200, 200, 0.5)"
        );
    }

    #[test]
    fn test_material_serde_is_lowercase() {
        let json = serde_json::to_string(&Material::Vapor).unwrap();
        assert_eq!(json, "\"vapor\"");
    }
}
