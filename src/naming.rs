//! Human-readable names for arbitrary colors.
//!
//! A color is named after the closest entry in a fixed table, measured as
//! squared ΔE in CIELAB.

use palette::Lab;

use crate::color::Color;

/// Fallback label when the table yields nothing.
const UNKNOWN_NAME: &str = "Unknown";

const NAMED_COLORS: &[(&str, u32)] = &[
    ("Black", 0x000000),
    ("Mine Shaft", 0x323232),
    ("Tundora", 0x4A4A4A),
    ("Dove Gray", 0x6D6C6C),
    ("Gray", 0x808080),
    ("Silver Chalice", 0xACACAC),
    ("Silver", 0xC0C0C0),
    ("Alto", 0xDBDBDB),
    ("Gallery", 0xEFEFEF),
    ("White", 0xFFFFFF),
    ("Ivory", 0xFFFFF0),
    ("Cream", 0xFFFDD0),
    ("Linen", 0xFAF0E6),
    ("Bone", 0xE4D1C0),
    ("Sand", 0xC2B280),
    ("Tan", 0xD2B48C),
    ("Khaki", 0xF0E68C),
    ("Maroon", 0x800000),
    ("Burgundy", 0x900020),
    ("Crimson", 0xDC143C),
    ("Red", 0xFF0000),
    ("Scarlet", 0xFF2400),
    ("Torch Red", 0xFD0E35),
    ("Cardinal", 0xC41E3A),
    ("Brick Red", 0xC62D42),
    ("Sunset Orange", 0xFE4C40),
    ("Bittersweet", 0xFE6F5E),
    ("Salmon", 0xFF8C69),
    ("Coral", 0xFF7F50),
    ("Tomato", 0xFF6347),
    ("Vermilion", 0xFF4D00),
    ("Flamingo", 0xF2552A),
    ("Pumpkin", 0xFF7518),
    ("Orange", 0xFF7F00),
    ("Tangerine", 0xF28500),
    ("Carrot Orange", 0xED9121),
    ("Sea Buckthorn", 0xFBA129),
    ("Amber", 0xFFBF00),
    ("Gold", 0xFFD700),
    ("Sunglow", 0xFFCC33),
    ("Mustard", 0xFFDB58),
    ("Yellow", 0xFFFF00),
    ("Canary", 0xF3FB62),
    ("Lemon", 0xFDE910),
    ("Laser Lemon", 0xFFFF66),
    ("Olive", 0x808000),
    ("Sahara", 0xB7A214),
    ("Rust", 0xB7410E),
    ("Sienna", 0xA0522D),
    ("Chocolate", 0x7B3F00),
    ("Brown", 0x964B00),
    ("Copper", 0xB87333),
    ("Bronze", 0xCD7F32),
    ("Peru", 0xCD853F),
    ("Peach", 0xFFE5B4),
    ("Apricot", 0xFBCEB1),
    ("Lime", 0x00FF00),
    ("Chartreuse", 0x7FFF00),
    ("Bright Green", 0x66FF00),
    ("Lawn Green", 0x7CFC00),
    ("Pistachio", 0x93C572),
    ("Yellow Green", 0x9ACD32),
    ("Atlantis", 0x97CD2D),
    ("Conifer", 0xACDD4D),
    ("Sushi", 0x87AB39),
    ("Olive Drab", 0x6B8E23),
    ("Fern", 0x63B76C),
    ("Mantis", 0x74C365),
    ("Pastel Green", 0x77DD77),
    ("Malachite", 0x0BDA51),
    ("Emerald", 0x50C878),
    ("Green", 0x008000),
    ("Forest Green", 0x228B22),
    ("Jade", 0x00A86B),
    ("Shamrock", 0x33CC99),
    ("Mountain Meadow", 0x1AB385),
    ("Spring Green", 0x00FF7F),
    ("Medium Spring Green", 0x00FA9A),
    ("Aquamarine", 0x7FFFD4),
    ("Turquoise", 0x30D5C8),
    ("Java", 0x1FC2C2),
    ("Persian Green", 0x00A693),
    ("Teal", 0x008080),
    ("Aqua", 0x00FFFF),
    ("Robin's Egg Blue", 0x00CCCC),
    ("Bondi Blue", 0x0095B6),
    ("Pacific Blue", 0x009DC4),
    ("Cerulean", 0x007BA7),
    ("Sky Blue", 0x87CEEB),
    ("Malibu", 0x7DC8F7),
    ("Picton Blue", 0x45B1E8),
    ("Dodger Blue", 0x1E90FF),
    ("Azure Radiance", 0x007FFF),
    ("Cornflower Blue", 0x6495ED),
    ("Royal Blue", 0x4169E1),
    ("Steel Blue", 0x4682B4),
    ("Denim", 0x1560BD),
    ("Cobalt", 0x0047AB),
    ("Blue", 0x0000FF),
    ("Navy Blue", 0x000080),
    ("Midnight Blue", 0x003366),
    ("Indigo", 0x4B0082),
    ("Ultramarine", 0x3F00FF),
    ("Electric Violet", 0x8B00FF),
    ("Blue Violet", 0x8A2BE2),
    ("Medium Purple", 0x9370DB),
    ("Lavender", 0xB57EDC),
    ("Wisteria", 0xC9A0DC),
    ("Heliotrope", 0xDF73FF),
    ("Amethyst", 0x9966CC),
    ("Purple", 0x800080),
    ("Plum", 0x8E4585),
    ("Orchid", 0xDA70D6),
    ("Violet", 0xEE82EE),
    ("Magenta", 0xFF00FF),
    ("Purple Pizzazz", 0xFF00CC),
    ("Hot Pink", 0xFF69B4),
    ("Deep Pink", 0xFF1493),
    ("Cerise", 0xDE3163),
    ("Razzmatazz", 0xE30B5C),
    ("Rose", 0xFF007F),
    ("Raspberry", 0xE30B5D),
    ("Carnation Pink", 0xFFA6C9),
    ("Pink", 0xFFC0CB),
    ("Mauve", 0xE0B0FF),
    ("Thistle", 0xD8BFD8),
    ("Wild Strawberry", 0xFF3399),
    ("Brink Pink", 0xFB607F),
    ("Froly", 0xF57584),
    ("Mandy", 0xE25465),
];

fn table_color(rgb: u32) -> Color {
    Color::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn delta_e_sq(a: &Lab, b: &Lab) -> f32 {
    (a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)
}

/// Name of the table color closest to `color`.
pub fn color_name(color: &Color) -> &'static str {
    let lab = color.to_lab();
    NAMED_COLORS
        .iter()
        .map(|&(name, rgb)| (name, delta_e_sq(&lab, &table_color(rgb).to_lab())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
        .unwrap_or(UNKNOWN_NAME)
}
