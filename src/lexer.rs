//! Byte-level scanning: the bounded cursor and scalar token readers

pub mod cursor;
pub mod scalar;

pub use cursor::Cursor;
pub use scalar::Scalar;

/// Space plus the control bytes backspace (0x08) through carriage return (0x0D)
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | 0x08..=0x0D)
}
