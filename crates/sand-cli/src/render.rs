//! Plain-text rendering of a frame snapshot.

use sand_core::Material;
use sand_world::Frame;

fn glyph(material: Material) -> char {
    match material {
        Material::Default => 'o',
        Material::Sand => '.',
        Material::Water => '~',
        Material::Lava => '^',
        Material::Rock => '#',
        Material::Vapor => '\'',
        Material::Dog => 'D',
    }
}

/// One line per grid row, empty cells as spaces, framed by a border
pub fn render_ascii(frame: &Frame) -> String {
    let border = format!("+{}+\n", "-".repeat(frame.width.max(0) as usize));
    let mut out = border.clone();

    for y in 0..frame.height {
        out.push('|');
        for x in 0..frame.width {
            out.push(frame.cell(x, y).map_or(' ', |cell| glyph(cell.material)));
        }
        out.push_str("|\n");
    }

    out.push_str(&border);
    out
}
