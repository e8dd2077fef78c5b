//! Catalogue of the stimuli the menus can select, and how their identifiers
//! resolve to something a display or mixer can present.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StimulusError;
use crate::pool::StimulusId;

/// Background color shown whenever no color stimulus is active.
pub const BACKGROUND_RGBA: [u8; 4] = [202, 178, 152, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl ArrowDirection {
    /// Rotation of the arrow sprite around the z axis, in degrees.
    pub fn rotation_degrees(&self) -> f32 {
        match self {
            Self::Left => 180.0,
            Self::Right => 0.0,
            Self::Up => 90.0,
            Self::Down => -90.0,
            Self::UpLeft => 135.0,
            Self::UpRight => 45.0,
            Self::DownLeft => -135.0,
            Self::DownRight => -45.0,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Up" => Self::Up,
            "Down" => Self::Down,
            "Left" => Self::Left,
            "Right" => Self::Right,
            "UpLeft" => Self::UpLeft,
            "UpRight" => Self::UpRight,
            "DownLeft" => Self::DownLeft,
            "DownRight" => Self::DownRight,
            _ => return None,
        })
    }
}

/// What a visual stimulus identifier asks the display to do.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualCue {
    /// Flood the background with a color.
    Color { rgba: [u8; 4] },
    /// Show the arrow sprite rotated towards a direction.
    Arrow { direction: ArrowDirection },
    /// Show a single letter or digit.
    Symbol { glyph: char },
}

impl VisualCue {
    pub fn resolve(id: &StimulusId) -> Result<Self, StimulusError> {
        let unknown = || StimulusError::UnknownStimulusId(id.clone());
        let base = id.as_str().strip_suffix("Button").unwrap_or(id.as_str());

        if base.contains("Color") {
            let name = base.replace("Color", "");
            let rgba = match name.as_str() {
                "Red" => [255, 0, 0, 255],
                "Green" => [0, 255, 0, 255],
                "Orange" => [255, 165, 0, 255],
                "Blue" => [0, 0, 255, 255],
                "Yellow" => [255, 235, 4, 255],
                "Pink" => [255, 134, 155, 255],
                _ => return Err(unknown()),
            };
            Ok(Self::Color { rgba })
        } else if base.contains("Arrow") {
            ArrowDirection::from_name(&base.replace("Arrow", ""))
                .map(|direction| Self::Arrow { direction })
                .ok_or_else(unknown)
        } else if base.contains("Letter") || base.contains("Number") {
            match base.chars().last() {
                Some(glyph) if glyph.is_ascii_alphanumeric() && base.len() > "Letter".len() => {
                    Ok(Self::Symbol { glyph })
                }
                _ => Err(unknown()),
            }
        } else {
            Err(unknown())
        }
    }
}

macro_rules! sound_names {
    ($($name:ident),* $(,)?) => {
        /// Every clip the mixer knows how to play.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum SoundName {
            $($name),*
        }

        impl SoundName {
            pub const ALL: &'static [SoundName] = &[$(SoundName::$name),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(SoundName::$name => stringify!($name)),*
                }
            }
        }
    };
}

sound_names!(
    Left, Right, Up, Down, UpLeft, UpRight, DownLeft, DownRight, Red, Green, Orange, Blue,
    Yellow, Pink, Number1, Number2, Number3, Number4, Number5, Number6, Number7, Number8,
    Number9, LetterA, LetterB, LetterC, LetterD, LetterE, LetterF, LetterG, LetterH, Beep,
    Monkey,
);

impl FromStr for SoundName {
    type Err = StimulusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|sound| sound.as_str() == s)
            .ok_or_else(|| StimulusError::UnknownSound(s.to_owned()))
    }
}

impl SoundName {
    /// Maps an audio pool identifier such as `UpArrowButton` or
    /// `BeepNoiseButton` onto the clip it stands for.
    pub fn from_pool_id(id: &StimulusId) -> Result<Self, StimulusError> {
        let mut name = id.as_str().replace("Button", "");
        for category in ["Arrow", "Color", "Noise"] {
            if name.contains(category) {
                name = name.replace(category, "");
                break;
            }
        }
        name.parse()
            .map_err(|_| StimulusError::UnknownStimulusId(id.clone()))
    }
}

impl std::fmt::Display for SoundName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(id: &str) -> Result<VisualCue, StimulusError> {
        VisualCue::resolve(&StimulusId::from(id))
    }

    #[test]
    fn colors_resolve_to_rgba() {
        assert_eq!(cue("OrangeColorButton"), Ok(VisualCue::Color { rgba: [255, 165, 0, 255] }));
        assert_eq!(cue("PinkColorButton"), Ok(VisualCue::Color { rgba: [255, 134, 155, 255] }));
        assert!(cue("PurpleColorButton").is_err());
    }

    #[test]
    fn arrows_carry_their_rotation() {
        let Ok(VisualCue::Arrow { direction }) = cue("DownLeftArrowButton") else {
            panic!("expected an arrow");
        };
        assert_eq!(direction, ArrowDirection::DownLeft);
        assert_eq!(direction.rotation_degrees(), -135.0);
    }

    #[test]
    fn letters_and_numbers_show_their_last_character() {
        assert_eq!(cue("LetterFButton"), Ok(VisualCue::Symbol { glyph: 'F' }));
        assert_eq!(cue("Number7"), Ok(VisualCue::Symbol { glyph: '7' }));
        assert!(cue("LetterButton").is_err());
    }

    #[test]
    fn unrelated_ids_are_unknown() {
        assert_eq!(
            cue("Monkey"),
            Err(StimulusError::UnknownStimulusId(StimulusId::from("Monkey")))
        );
    }

    #[test]
    fn audio_ids_drop_their_category() {
        let sound = |id: &str| SoundName::from_pool_id(&StimulusId::from(id));
        assert_eq!(sound("UpRightArrowButton"), Ok(SoundName::UpRight));
        assert_eq!(sound("GreenColorButton"), Ok(SoundName::Green));
        assert_eq!(sound("MonkeyNoiseButton"), Ok(SoundName::Monkey));
        assert_eq!(sound("Number9Button"), Ok(SoundName::Number9));
        assert!(sound("Number0Button").is_err());
    }

    #[test]
    fn sound_names_are_case_sensitive() {
        assert_eq!(SoundName::ALL.len(), 33);
        assert_eq!("LetterH".parse::<SoundName>(), Ok(SoundName::LetterH));
        assert!("letterh".parse::<SoundName>().is_err());
    }
}
