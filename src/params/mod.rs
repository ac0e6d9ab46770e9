//! Request-parameter parsing and option building.
//!
//! The HTTP surface accepts loosely-typed form fields: hex or comma RGBA
//! colors, opacity floats, enum strings over small fixed vocabularies. This
//! module normalizes them into the imaging adapter's option types.
//!
//! Policy: malformed *optional* fields degrade silently to the endpoint
//! defaults (visual fallback beats aborting an image request); the parsers
//! return `Option` and callers substitute defaults at the call site.

pub mod color;
pub mod geometry;
pub mod text;

pub use color::{clamp_opacity, parse_rgba, resolve_color};
pub use geometry::{parse_align, parse_gravity, parse_position};
pub use text::{build_placement, build_text_options, TextFields};
