use crate::GeometryError;
use bytemuck::{Pod, Zeroable};
use std::{fmt, str::FromStr};

/// 24-bit sRGB color, memory layout matches a single PPM/PNG RGB pixel
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[repr(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub const fn red(self) -> u8 {
        self.0[0]
    }

    pub const fn green(self) -> u8 {
        self.0[1]
    }

    pub const fn blue(self) -> u8 {
        self.0[2]
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb([r, g, b]) = self;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = GeometryError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        let hex = color
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6)
            .ok_or(GeometryError::InvalidColor)?;
        let digit = |byte: u8| match byte {
            b'A'..=b'F' => Ok(byte - b'A' + 10),
            b'a'..=b'f' => Ok(byte - b'a' + 10),
            b'0'..=b'9' => Ok(byte - b'0'),
            _ => Err(GeometryError::InvalidColor),
        };
        let mut rgb = [0u8; 3];
        for (channel, pair) in rgb.iter_mut().zip(hex.as_bytes().chunks(2)) {
            *channel = (digit(pair[0])? << 4) | digit(pair[1])?;
        }
        Ok(Rgb(rgb))
    }
}

impl TryFrom<String> for Rgb {
    type Error = GeometryError;

    fn try_from(color: String) -> Result<Self, Self::Error> {
        color.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}
