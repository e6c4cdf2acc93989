//! Colors and small text helpers shared by the components

use ratatui::style::{Color, Modifier, Style};

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ERROR_RED: Color = Color::Rgb(232, 96, 96);

/// Badge background for an unrecognized type name.
pub const DEFAULT_BADGE: Color = Color::Rgb(104, 112, 120);

pub const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Badge color for a Pokemon type. Unknown names fall back to `DEFAULT_BADGE`.
pub fn type_color(name: &str) -> Color {
    match name {
        "normal" => Color::Rgb(168, 167, 122),
        "fire" => Color::Rgb(238, 129, 48),
        "water" => Color::Rgb(99, 144, 240),
        "electric" => Color::Rgb(247, 208, 44),
        "grass" => Color::Rgb(122, 199, 76),
        "ice" => Color::Rgb(150, 217, 214),
        "fighting" => Color::Rgb(194, 46, 40),
        "poison" => Color::Rgb(163, 62, 161),
        "ground" => Color::Rgb(226, 191, 101),
        "flying" => Color::Rgb(169, 143, 243),
        "psychic" => Color::Rgb(249, 85, 135),
        "bug" => Color::Rgb(166, 185, 26),
        "rock" => Color::Rgb(182, 161, 54),
        "ghost" => Color::Rgb(115, 87, 151),
        "dragon" => Color::Rgb(111, 53, 252),
        "dark" => Color::Rgb(112, 87, 70),
        "steel" => Color::Rgb(183, 183, 206),
        "fairy" => Color::Rgb(214, 133, 173),
        _ => DEFAULT_BADGE,
    }
}

/// Badge color for a book category.
pub fn category_color(name: &str) -> Color {
    match name {
        "free-ebooks" => Color::Rgb(122, 199, 76),
        "Paid ebooks" => ACCENT_GOLD,
        _ => Color::Rgb(99, 144, 240),
    }
}

/// Dark text on bright badges, light text on dark ones.
pub fn badge_style(bg: Color) -> Style {
    let fg = match bg {
        Color::Rgb(r, g, b) if (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000 > 140 => {
            BG_BASE
        }
        _ => TEXT_MAIN,
    };
    Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
}

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// "mr-mime" -> "Mr Mime"
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
