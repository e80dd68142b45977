use crate::error::Location;

/// 1-based line and column of the byte at `offset`.
pub fn locate(input: &[u8], offset: usize) -> Location {
    let mut location = Location { line: 1, column: 1 };
    for &b in &input[..offset.min(input.len())] {
        if b == b'\n' {
            location.line += 1;
            location.column = 1;
        } else {
            location.column += 1;
        }
    }
    location
}
