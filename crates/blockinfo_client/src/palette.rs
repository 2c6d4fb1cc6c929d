use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(255, 255, 255);
    pub const RED: Self = Self(255, 0, 0);
    pub const LIME: Self = Self(0, 255, 0);
    pub const YELLOW: Self = Self(255, 255, 0);
    pub const GRAY: Self = Self(128, 128, 128);
}

/// Rich-text color tag body, "r,g,b".
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

pub const BLOCKTITLE: Rgb = Rgb(50, 155, 255);
pub const BLOCKVARIANTS: Rgb = Rgb(255, 233, 55);
pub const NORMAL: Rgb = Rgb::WHITE;
pub const GOOD: Rgb = Rgb::LIME;
pub const BAD: Rgb = Rgb::RED;
pub const WARNING: Rgb = Rgb::YELLOW;
pub const UNIMPORTANT: Rgb = Rgb::GRAY;
pub const PART: Rgb = Rgb(55, 255, 155);
pub const MOD: Rgb = Rgb(0, 191, 255);
pub const MOD_TITLE: Rgb = Rgb(173, 255, 47);
pub const OWNER: Rgb = Rgb(55, 255, 255);
pub const INFO: Rgb = Rgb(69, 177, 227);
pub const MASS: Rgb = Rgb(200, 255, 55);

pub const STAT_PROJECTILECOUNT: Rgb = Rgb(0, 255, 0);
pub const STAT_SHIPDMG: Rgb = Rgb(0, 255, 200);
pub const STAT_CHARACTERDMG: Rgb = Rgb(255, 155, 0);
pub const STAT_HEADSHOTDMG: Rgb = Rgb(255, 0, 0);
pub const STAT_SPEED: Rgb = Rgb(0, 200, 255);
pub const STAT_TRAVEL: Rgb = Rgb(55, 80, 255);
