//! C source emission for packed planes

use std::fmt::Write;

use crate::codec::Plane;

/// Render planes as a `const char` array literal.
///
/// One line per plane, every byte written as `0x` plus two lowercase hex
/// digits followed by `", "`.
///
/// # Examples
///
/// ```
/// use mintile::emit::emit;
///
/// let text = emit(&[[0xFF, 0, 0, 0, 0, 0, 0, 0x0A]], "ball");
/// assert_eq!(
///     text,
///     "const char ball[] = {\n0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0a, \n};\n"
/// );
/// ```
pub fn emit(planes: &[Plane], symbol: &str) -> String {
    // "0x00, " is six characters, plus a newline per plane
    let mut body = String::with_capacity(planes.len() * (8 * 6 + 1));
    for plane in planes {
        for byte in plane {
            // Writing into a String cannot fail
            let _ = write!(body, "0x{:02x}, ", byte);
        }
        body.push('\n');
    }
    format!("const char {}[] = {{\n{}}};\n", symbol, body)
}

/// Derive the array name from a destination file name.
///
/// Strips a final extension of one or more non-dot characters:
/// `"sprite.c"` becomes `"sprite"`, `"a.b.c"` becomes `"a.b"`, and a name
/// with no extension (or a trailing dot) is returned unchanged.
pub fn symbol_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() => file_name[..idx].to_string(),
        _ => file_name.to_string(),
    }
}
