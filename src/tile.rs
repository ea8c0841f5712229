//! The 34-tile identity model: three number suits plus honors, with
//! suit-local successor/predecessor and the canonical tile-set constants.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Man,
    Pin,
    Sou,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Honor {
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

/// One of the 34 tile identities. Ordered `(suit, rank)` with suits
/// `m < p < s < z`, matching the variant declaration order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tile {
    Suited { suit: Suit, value: u8 },
    Honor(Honor),
}

impl Tile {
    pub const fn suited(suit: Suit, value: u8) -> Self {
        Tile::Suited { suit, value }
    }

    pub const fn honor(honor: Honor) -> Self {
        Tile::Honor(honor)
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Tile::Suited { suit, .. } => Some(*suit),
            Tile::Honor(_) => None,
        }
    }

    pub fn value(&self) -> Option<u8> {
        match self {
            Tile::Suited { value, .. } => Some(*value),
            Tile::Honor(_) => None,
        }
    }

    pub fn is_terminal_or_honor(&self) -> bool {
        match self {
            Tile::Suited { value, .. } => *value == 1 || *value == 9,
            Tile::Honor(_) => true,
        }
    }

    /// The next tile within the same suit, or `None` at `9` and for honors.
    pub fn next(&self) -> Option<Tile> {
        match self {
            Tile::Suited { suit, value } if *value < 9 => Some(Tile::Suited {
                suit: *suit,
                value: value + 1,
            }),
            _ => None,
        }
    }

    /// The previous tile within the same suit, or `None` at `1` and for honors.
    pub fn prev(&self) -> Option<Tile> {
        match self {
            Tile::Suited { suit, value } if *value > 1 => Some(Tile::Suited {
                suit: *suit,
                value: value - 1,
            }),
            _ => None,
        }
    }

    /// Compact index in `0..34`, canonical order `m, p, s, z`.
    pub fn index(&self) -> usize {
        match self {
            Tile::Suited { suit, value } => {
                let base = match suit {
                    Suit::Man => 0,
                    Suit::Pin => 9,
                    Suit::Sou => 18,
                };
                base + (*value as usize - 1)
            }
            Tile::Honor(h) => 27 + *h as usize,
        }
    }

    pub fn from_index(index: usize) -> Option<Tile> {
        Tiles::ALL.get(index).copied()
    }
}

const fn suit_tiles(suit: Suit) -> [Tile; 9] {
    [
        Tile::Suited { suit, value: 1 },
        Tile::Suited { suit, value: 2 },
        Tile::Suited { suit, value: 3 },
        Tile::Suited { suit, value: 4 },
        Tile::Suited { suit, value: 5 },
        Tile::Suited { suit, value: 6 },
        Tile::Suited { suit, value: 7 },
        Tile::Suited { suit, value: 8 },
        Tile::Suited { suit, value: 9 },
    ]
}

const fn concat34(mans: [Tile; 9], pins: [Tile; 9], sous: [Tile; 9], honors: [Tile; 7]) -> [Tile; 34] {
    [
        mans[0], mans[1], mans[2], mans[3], mans[4], mans[5], mans[6], mans[7], mans[8],
        pins[0], pins[1], pins[2], pins[3], pins[4], pins[5], pins[6], pins[7], pins[8],
        sous[0], sous[1], sous[2], sous[3], sous[4], sous[5], sous[6], sous[7], sous[8],
        honors[0], honors[1], honors[2], honors[3], honors[4], honors[5], honors[6],
    ]
}

/// Canonical tile-set constants (the spec's `Tiles` namespace).
pub struct Tiles;

impl Tiles {
    pub const MANS: [Tile; 9] = suit_tiles(Suit::Man);
    pub const PINS: [Tile; 9] = suit_tiles(Suit::Pin);
    pub const SOUS: [Tile; 9] = suit_tiles(Suit::Sou);

    pub const HONORS: [Tile; 7] = [
        Tile::Honor(Honor::East),
        Tile::Honor(Honor::South),
        Tile::Honor(Honor::West),
        Tile::Honor(Honor::North),
        Tile::Honor(Honor::White),
        Tile::Honor(Honor::Green),
        Tile::Honor(Honor::Red),
    ];

    pub const ALL: [Tile; 34] = concat34(Self::MANS, Self::PINS, Self::SOUS, Self::HONORS);

    /// The 13 terminal and honor tiles used by thirteen orphans.
    pub const TERMINALS_AND_HONORS: [Tile; 13] = [
        Tile::Suited { suit: Suit::Man, value: 1 },
        Tile::Suited { suit: Suit::Man, value: 9 },
        Tile::Suited { suit: Suit::Pin, value: 1 },
        Tile::Suited { suit: Suit::Pin, value: 9 },
        Tile::Suited { suit: Suit::Sou, value: 1 },
        Tile::Suited { suit: Suit::Sou, value: 9 },
        Tile::Honor(Honor::East),
        Tile::Honor(Honor::South),
        Tile::Honor(Honor::West),
        Tile::Honor(Honor::North),
        Tile::Honor(Honor::White),
        Tile::Honor(Honor::Green),
        Tile::Honor(Honor::Red),
    ];
}

impl TryFrom<&str> for Tile {
    type Error = String;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = input.chars().collect();
        if chars.len() != 2 {
            return Err(format!("invalid tile format: {input}"));
        }

        let value_char = chars[0];
        let suit_char = chars[1];

        match suit_char {
            'm' | 'p' | 's' => {
                let suit = match suit_char {
                    'm' => Suit::Man,
                    'p' => Suit::Pin,
                    _ => Suit::Sou,
                };
                let val = value_char.to_digit(10).ok_or("not a digit")? as u8;
                if !(1..=9).contains(&val) {
                    return Err("suited tiles must be 1-9".to_string());
                }
                Ok(Tile::Suited { suit, value: val })
            }
            'z' => {
                let val_digit = value_char.to_digit(10).ok_or("not a digit")? as u8;
                let honor = match val_digit {
                    1 => Honor::East,
                    2 => Honor::South,
                    3 => Honor::West,
                    4 => Honor::North,
                    5 => Honor::White,
                    6 => Honor::Green,
                    7 => Honor::Red,
                    _ => return Err("out of bounds for honors".into()),
                };
                Ok(Tile::Honor(honor))
            }
            _ => Err(format!("unknown suit: {suit_char}")),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tile::Suited { suit, value } => {
                let s = match suit {
                    Suit::Man => 'm',
                    Suit::Pin => 'p',
                    Suit::Sou => 's',
                };
                write!(f, "{value}{s}")
            }
            Tile::Honor(h) => {
                let v = match h {
                    Honor::East => 1,
                    Honor::South => 2,
                    Honor::West => 3,
                    Honor::North => 4,
                    Honor::White => 5,
                    Honor::Green => 6,
                    Honor::Red => 7,
                };
                write!(f, "{v}z")
            }
        }
    }
}
