use chumsky::{
    error::Simple,
    primitive::{
        end,
        filter,
        filter_map,
    },
    Parser,
};

#[must_use]
pub fn hex_pattern() -> impl Parser<char, Vec<u8>, Error = Simple<char>> {
    let whitespace = filter(|c: &char| c.is_whitespace()).repeated();
    let byte = filter_map(|span, c: char| match c.to_digit(16) {
        // a hexdigit always fits in a nibble
        #[allow(clippy::cast_possible_truncation)]
        Some(digit) => Ok(digit as u8),
        None => Err(Simple::custom(span, format!("'{c}' is not a hexdigit"))),
    })
    .repeated()
    .exactly(2)
    .map(|nibbles| (nibbles[0] << 4) | nibbles[1]);

    byte.separated_by(whitespace.at_least(1))
        .at_least(1)
        .padded_by(whitespace)
}

/// Parses an entire hex pattern, rejecting any trailing input.
pub fn parse_hex(pattern: &str) -> Result<Vec<u8>, Vec<Simple<char>>> {
    hex_pattern().then_ignore(end()).parse(pattern)
}
