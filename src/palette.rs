/// Straight-alpha 8-bit color, independent of any UI toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

const CATEGORY: [Rgba; 10] = [
    Rgba::rgb(31, 119, 180),
    Rgba::rgb(255, 127, 14),
    Rgba::rgb(44, 160, 44),
    Rgba::rgb(214, 39, 40),
    Rgba::rgb(148, 103, 189),
    Rgba::rgb(140, 86, 75),
    Rgba::rgb(227, 119, 194),
    Rgba::rgb(127, 127, 127),
    Rgba::rgb(188, 189, 34),
    Rgba::rgb(23, 190, 207),
];

pub const HIGHLIGHT_COLOR: Rgba = Rgba::rgb(255, 221, 87);
pub const HIGHLIGHT_SCALE: f32 = 1.5;
pub const EDGE_COLOR: Rgba = Rgba::rgba(156, 170, 190, 150);

/// Colors cycle once the group number passes the palette size.
pub fn group_color(group: u32) -> Rgba {
    CATEGORY[group as usize % CATEGORY.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_cycle_through_palette() {
        assert_eq!(group_color(0), group_color(10));
        assert_ne!(group_color(0), group_color(1));
        assert_ne!(group_color(3), HIGHLIGHT_COLOR);
    }
}
