//! Placement form-field parsing.
//!
//! Case-insensitive lookups over fixed vocabularies: 9 named positions, 9
//! compass gravities, 3 alignments. Unrecognized input yields `None` so the
//! caller's default applies; it is never an error.

use crate::imaging::{Gravity, NamedPosition, TextAlign};

/// Parse a named 9-grid position.
pub fn parse_position(raw: Option<&str>) -> Option<NamedPosition> {
    match raw?.trim().to_lowercase().as_str() {
        "center" => Some(NamedPosition::Center),
        "top" => Some(NamedPosition::Top),
        "bottom" => Some(NamedPosition::Bottom),
        "left" => Some(NamedPosition::Left),
        "right" => Some(NamedPosition::Right),
        "top-left" => Some(NamedPosition::TopLeft),
        "top-right" => Some(NamedPosition::TopRight),
        "bottom-left" => Some(NamedPosition::BottomLeft),
        "bottom-right" => Some(NamedPosition::BottomRight),
        _ => None,
    }
}

/// Parse a compass gravity. Accepts both joined and hyphenated spellings.
pub fn parse_gravity(raw: Option<&str>) -> Option<Gravity> {
    match raw?.trim().to_lowercase().as_str() {
        "center" => Some(Gravity::Center),
        "north" => Some(Gravity::North),
        "south" => Some(Gravity::South),
        "east" => Some(Gravity::East),
        "west" => Some(Gravity::West),
        "northeast" | "north-east" => Some(Gravity::NorthEast),
        "northwest" | "north-west" => Some(Gravity::NorthWest),
        "southeast" | "south-east" => Some(Gravity::SouthEast),
        "southwest" | "south-west" => Some(Gravity::SouthWest),
        _ => None,
    }
}

/// Parse a text alignment.
pub fn parse_align(raw: Option<&str>) -> Option<TextAlign> {
    match raw?.trim().to_lowercase().as_str() {
        "left" => Some(TextAlign::Left),
        "center" => Some(TextAlign::Center),
        "right" => Some(TextAlign::Right),
        _ => None,
    }
}
