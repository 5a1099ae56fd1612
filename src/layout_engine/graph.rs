use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn direction_names_round_trip() {
        for direction in Direction::iter() {
            assert_eq!(Direction::from_str(&direction.to_string()), Ok(direction));
        }
        assert_eq!(Direction::Left.to_string(), "left");
    }

    #[test]
    fn direction_names_are_case_sensitive() {
        assert!(Direction::from_str("Left").is_err());
        assert!(Direction::from_str("sideways").is_err());
    }
}
