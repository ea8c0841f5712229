//! Hand-string parsing: the only boundary where tile notation meets the
//! typed model. Plain digit-suit runs (`123m456p789s11z`) become concealed
//! tiles; bracketed runs become declared calls. `[1111m]` is a concealed
//! quad, `(1111m)` an open quad, `(111m)` an open triplet, `(123m)` an open
//! sequence.

use crate::count::{Call, CallKind};
use crate::error::InvalidHand;
use crate::tile::{Honor, Suit, Tile};

/// Parse a run of plain tile notation with no calls: `123m456p789s1234z`.
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>, InvalidHand> {
    let mut tiles = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    let chars: Vec<char> = input.chars().collect();

    for &ch in &chars {
        match ch {
            '1'..='9' => pending.push(ch.to_digit(10).unwrap() as u8),
            'm' | 'p' | 's' => {
                let suit = match ch {
                    'm' => Suit::Man,
                    'p' => Suit::Pin,
                    _ => Suit::Sou,
                };
                for &v in &pending {
                    tiles.push(Tile::suited(suit, v));
                }
                pending.clear();
            }
            'z' => {
                for &v in &pending {
                    let honor = honor_from_digit(v).ok_or_else(|| InvalidHand::InvalidTileNotation {
                        input: input.to_string(),
                    })?;
                    tiles.push(Tile::honor(honor));
                }
                pending.clear();
            }
            ' ' | '\t' | '\n' => {}
            _ => {
                return Err(InvalidHand::InvalidTileNotation {
                    input: input.to_string(),
                });
            }
        }
    }

    if !pending.is_empty() {
        return Err(InvalidHand::InvalidTileNotation {
            input: input.to_string(),
        });
    }

    Ok(tiles)
}

fn honor_from_digit(v: u8) -> Option<Honor> {
    Some(match v {
        1 => Honor::East,
        2 => Honor::South,
        3 => Honor::West,
        4 => Honor::North,
        5 => Honor::White,
        6 => Honor::Green,
        7 => Honor::Red,
        _ => return None,
    })
}

/// Parse the contents of one bracket pair (without the brackets) plus
/// whether it was square (concealed) or round (open) into a `Call`.
fn parse_call(body: &str, is_concealed_bracket: bool) -> Result<Call, InvalidHand> {
    let tiles = parse_tiles(body)?;

    let kind = match tiles.len() {
        4 => {
            if is_concealed_bracket {
                CallKind::ConcealedQuad
            } else {
                CallKind::OpenQuad
            }
        }
        3 => {
            let first = tiles[0];
            if tiles.iter().all(|&t| t == first) {
                CallKind::OpenTriplet
            } else {
                CallKind::OpenSequence
            }
        }
        len => return Err(InvalidHand::InvalidCallSize { len }),
    };

    Call::new(kind, tiles)
}

/// Parse a full hand string: plain runs become concealed tiles, bracketed
/// runs (`[...]` concealed, `(...)` open) become calls.
pub fn parse_hand(input: &str) -> Result<(Vec<Tile>, Vec<Call>), InvalidHand> {
    let chars: Vec<char> = input.chars().collect();
    let mut concealed = Vec::new();
    let mut calls = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' | '(' => {
                let is_concealed_bracket = chars[i] == '[';
                let close = if is_concealed_bracket { ']' } else { ')' };
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end] != close {
                    end += 1;
                }
                if end >= chars.len() {
                    return Err(InvalidHand::InvalidTileNotation {
                        input: input.to_string(),
                    });
                }
                let body: String = chars[start..end].iter().collect();
                calls.push(parse_call(&body, is_concealed_bracket)?);
                i = end + 1;
            }
            _ => {
                let start = i;
                while i < chars.len() && chars[i] != '[' && chars[i] != '(' {
                    i += 1;
                }
                let run: String = chars[start..i].iter().collect();
                if !run.trim().is_empty() {
                    concealed.extend(parse_tiles(&run)?);
                }
            }
        }
    }

    Ok((concealed, calls))
}

/// True iff any call is not a concealed quad (drawn tiles are already part
/// of `concealed`, so a fully concealed hand with only a closed kan is
/// still closed for scoring purposes).
pub fn is_opened(calls: &[Call]) -> bool {
    calls.iter().any(|c| !c.kind.is_concealed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_run() {
        let tiles = parse_tiles("123m456p789s11z").unwrap();
        assert_eq!(tiles.len(), 11);
        assert_eq!(tiles[0], Tile::suited(Suit::Man, 1));
        assert_eq!(tiles[9], Tile::honor(Honor::East));
    }

    #[test]
    fn parse_rejects_trailing_digits() {
        assert!(parse_tiles("123").is_err());
    }

    #[test]
    fn parse_rejects_out_of_range_honor() {
        assert!(parse_tiles("89z").is_err());
    }

    #[test]
    fn parse_hand_with_open_triplet_and_sequence() {
        let (concealed, calls) = parse_hand("(111m)(234p)789s11z").unwrap();
        assert_eq!(concealed.len(), 5);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].kind, CallKind::OpenTriplet);
        assert_eq!(calls[1].kind, CallKind::OpenSequence);
    }

    #[test]
    fn parse_hand_with_concealed_quad_is_closed() {
        let (_, calls) = parse_hand("[1111m]222333m555p11z").unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind, CallKind::ConcealedQuad);
        assert!(!is_opened(&calls));
    }

    #[test]
    fn parse_hand_with_open_quad_is_opened() {
        let (_, calls) = parse_hand("(1111m)222333m555p11z").unwrap();
        assert_eq!(calls[0].kind, CallKind::OpenQuad);
        assert!(is_opened(&calls));
    }

    #[test]
    fn parse_hand_rejects_unclosed_bracket() {
        assert!(parse_hand("[1111m").is_err());
    }
}
