//! Placement calculation for rendered text layers.
//!
//! Text can be anchored three ways: a named 9-grid position, a compass
//! gravity, or explicit coordinates marking the center of the block.

/// Named placement positions (9-grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedPosition {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Compass gravity (9 directions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    Center,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Gravity {
    /// The equivalent grid position for layer anchoring.
    pub fn to_position(self) -> NamedPosition {
        match self {
            Gravity::Center => NamedPosition::Center,
            Gravity::North => NamedPosition::Top,
            Gravity::South => NamedPosition::Bottom,
            Gravity::East => NamedPosition::Right,
            Gravity::West => NamedPosition::Left,
            Gravity::NorthEast => NamedPosition::TopRight,
            Gravity::NorthWest => NamedPosition::TopLeft,
            Gravity::SouthEast => NamedPosition::BottomRight,
            Gravity::SouthWest => NamedPosition::BottomLeft,
        }
    }
}

/// Where to place a rendered block on the target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// One of the 9 named grid positions.
    Position(NamedPosition),
    /// Compass gravity, mapped onto the same grid.
    Gravity(Gravity),
    /// Explicit coordinates marking the center of the block.
    At { x: i64, y: i64 },
}

/// Top-left coordinates for a block placed on an image.
///
/// Coordinates may be negative when the block is larger than the image;
/// the compositor clips to the visible region.
pub fn anchor(
    placement: Placement,
    image_width: u32,
    image_height: u32,
    block_width: u32,
    block_height: u32,
) -> (i64, i64) {
    let img_w = image_width as i64;
    let img_h = image_height as i64;
    let blk_w = block_width as i64;
    let blk_h = block_height as i64;

    let position = match placement {
        Placement::At { x, y } => return (x - blk_w / 2, y - blk_h / 2),
        Placement::Position(p) => p,
        Placement::Gravity(g) => g.to_position(),
    };

    let center_x = (img_w - blk_w) / 2;
    let center_y = (img_h - blk_h) / 2;
    let right_x = img_w - blk_w;
    let bottom_y = img_h - blk_h;

    match position {
        NamedPosition::Center => (center_x, center_y),
        NamedPosition::Top => (center_x, 0),
        NamedPosition::Bottom => (center_x, bottom_y),
        NamedPosition::Left => (0, center_y),
        NamedPosition::Right => (right_x, center_y),
        NamedPosition::TopLeft => (0, 0),
        NamedPosition::TopRight => (right_x, 0),
        NamedPosition::BottomLeft => (0, bottom_y),
        NamedPosition::BottomRight => (right_x, bottom_y),
    }
}
