//! Material display attributes and cell construction.

use crate::config::RuleConfig;
use crate::types::{Cell, Color, Material};
use rand::Rng;
use std::ops::Range;

const SAND_LIGHT: Color = Color::rgb(244, 200, 96);
const SAND_DARK: Color = Color::rgb(139, 69, 19);

/// How a material picks the color of a new cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorRule {
    Fixed(Color),
    /// Uniformly random point on the line between two colors
    Gradient { from: Color, to: Color },
}

/// Registry of per-material display attributes
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    vapor_lifetime: Range<u32>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new(&RuleConfig::default())
    }
}

impl MaterialCatalog {
    pub fn new(rules: &RuleConfig) -> Self {
        Self {
            vapor_lifetime: rules.vapor_lifetime_min..rules.vapor_lifetime_max,
        }
    }

    pub fn color_rule(&self, material: Material) -> ColorRule {
        match material {
            Material::Sand => ColorRule::Gradient {
                from: SAND_LIGHT,
                to: SAND_DARK,
            },
            other => ColorRule::Fixed(Self::base_color(other)),
        }
    }

    pub fn base_color(material: Material) -> Color {
        match material {
            Material::Default => Color::rgb(0x33, 0x33, 0x33),
            Material::Sand => Color::rgb(0xf4, 0xa4, 0x60),
            Material::Dog => Color::rgb(0xff, 0x63, 0x47),
            Material::Water => Color::rgb(0x1e, 0x90, 0xff),
            Material::Lava => Color::rgb(0xff, 0x45, 0x00),
            Material::Rock => Color::rgb(0x80, 0x80, 0x80),
            Material::Vapor => Color::rgba(200, 200, 200, 0.5),
        }
    }

    /// Draw a lifetime for a new vapor cell
    pub fn vapor_lifetime<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.vapor_lifetime.clone())
    }

    /// Build a fresh cell of the given material
    pub fn create<R: Rng + ?Sized>(&self, material: Material, rng: &mut R) -> Cell {
        let color = match self.color_rule(material) {
            ColorRule::Fixed(color) => color,
            ColorRule::Gradient { from, to } => Color::lerp(from, to, rng.gen::<f64>()),
        };

        let cell = Cell::new(material, color);
        if material == Material::Vapor {
            cell.with_lifetime(self.vapor_lifetime(rng))
        } else {
            cell
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sand_color_within_gradient() {
        let catalog = MaterialCatalog::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let cell = catalog.create(Material::Sand, &mut rng);
            assert!((139..=244).contains(&cell.color.r));
            assert!((69..=200).contains(&cell.color.g));
            assert!((19..=96).contains(&cell.color.b));
            assert_eq!(cell.lifetime, None);
        }
    }

    #[test]
    fn test_sand_colors_vary() {
        let catalog = MaterialCatalog::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let first = catalog.create(Material::Sand, &mut rng);
        let varied = (0..20).any(|_| catalog.create(Material::Sand, &mut rng).color != first.color);
        assert!(varied);
    }

    #[test]
    fn test_fixed_colors() {
        let catalog = MaterialCatalog::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let water = catalog.create(Material::Water, &mut rng);
        assert_eq!(water.color.to_css(), "#1e90ff");
        let rock = catalog.create(Material::Rock, &mut rng);
        assert_eq!(rock.color.to_css(), "#808080");
        let default = catalog.create(Material::Default, &mut rng);
        assert_eq!(default.color.to_css(), "#333333");
    }

    #[test]
    fn test_vapor_gets_lifetime_in_range() {
        let catalog = MaterialCatalog::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..200 {
            let vapor = catalog.create(Material::Vapor, &mut rng);
            let lifetime = vapor.lifetime.unwrap();
            assert!((300..600).contains(&lifetime));
        }
    }

    #[test]
    fn test_custom_lifetime_range() {
        let rules = RuleConfig {
            vapor_lifetime_min: 2,
            vapor_lifetime_max: 3,
            ..Default::default()
        };
        let catalog = MaterialCatalog::new(&rules);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(catalog.create(Material::Vapor, &mut rng).lifetime, Some(2));
    }
}
