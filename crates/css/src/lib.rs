pub mod style;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use style::{
    BORDER_SIDES, attach_inline_styles, border_side_style, convert_lengths_in_value,
    get_inline_style,
};
pub use syntax::{Declaration, parse_declarations};
pub use values::{Length, convert_length_to_px, is_px, parse_float_prefix, parse_length, to_px};
