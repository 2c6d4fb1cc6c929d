//! Screen placement of rich text and width padding of notification lines.

use glam::Vec2;

use crate::glyphs::SPACE_WIDTH;
use crate::host::{Background, HudState};
use crate::lines::Line;
use crate::palette::Rgb;
use crate::settings::Settings;

pub const TEXT_HUDPOS: Vec2 = Vec2::new(-0.9825, 0.8);
pub const TEXT_HUDPOS_WIDE: Vec2 = Vec2::new(-0.3275, 0.8);
pub const TEXT_HUDPOS_RIGHT: Vec2 = Vec2::new(0.9692, 0.26);
pub const TEXT_HUDPOS_RIGHT_WIDE: Vec2 = Vec2::new(0.3231, 0.26);

/// Triple-monitor setups report an aspect ratio above this.
pub const WIDE_ASPECT_RATIO: f32 = 5.0;

pub const TEXT_SCALE_BASE: f32 = 1.2;
pub const BACKGROUND_EDGE: f32 = 0.02;
pub const BACKGROUND_COLOR: Rgb = Rgb(41, 54, 62);
pub const MENU_BG_OPACITY: f32 = 0.7;
pub const BG_OPACITY_CAP: f32 = 0.98;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub offset: Vec2,
    pub background: Background,
}

/// Inputs of [`place`] besides the measured text size.
#[derive(Copy, Clone, Debug)]
pub struct PlacementContext<'a> {
    pub settings: &'a Settings,
    pub menu_open: bool,
    pub hud: HudState,
    pub hud_background_opacity: f32,
    pub aspect_ratio: f32,
}

pub fn text_scale(settings: &Settings) -> f32 {
    settings.text_scale * TEXT_SCALE_BASE
}

/// Anchors a rich-text block of `size` (height negative) and sizes its background.
pub fn place(size: Vec2, ctx: &PlacementContext<'_>) -> Placement {
    let wide = ctx.aspect_ratio > WIDE_ASPECT_RATIO;
    let mut position = Vec2::ZERO;
    let mut offset = Vec2::ZERO;

    if ctx.menu_open {
        offset = Vec2::new(-size.x, size.y / -2.0);
    } else if ctx.settings.custom_styling {
        position = ctx.settings.screen_pos;
        if ctx.settings.align_right {
            offset.x = -size.x;
        }
        if ctx.settings.align_bottom {
            offset.y = -size.y;
        }
    } else if ctx.hud == HudState::Hints {
        position = if wide {
            TEXT_HUDPOS_RIGHT_WIDE
        } else {
            TEXT_HUDPOS_RIGHT
        };
        offset = Vec2::new(-size.x, 0.0);
    } else {
        position = if wide { TEXT_HUDPOS_WIDE } else { TEXT_HUDPOS };
    }

    let edge = BACKGROUND_EDGE * text_scale(ctx.settings);
    let opacity = if ctx.menu_open {
        MENU_BG_OPACITY
    } else if ctx.settings.background_opacity < 0.0 {
        ctx.hud_background_opacity
    } else {
        ctx.settings.background_opacity
    };

    Placement {
        position,
        offset,
        background: Background {
            color: BACKGROUND_COLOR,
            opacity: opacity.min(BG_OPACITY_CAP),
            size: Vec2::new(size.x.abs() + edge, size.y.abs() + edge),
            offset: offset + size / 2.0,
        },
    }
}

/// Spaces that bring a line of `width` px up to `largest` px.
pub fn padding_spaces(width: u32, largest: u32) -> usize {
    (largest.saturating_sub(width) / SPACE_WIDTH) as usize
}

/// Pads every line to the widest one so the centered HUD lines share a left edge.
pub fn pad_lines(lines: &mut [Line], largest: u32) {
    for line in lines {
        let fill = padding_spaces(line.width, largest);
        line.text.extend(std::iter::repeat(' ').take(fill));
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::{
        pad_lines, padding_spaces, place, PlacementContext, BG_OPACITY_CAP, MENU_BG_OPACITY,
        TEXT_HUDPOS, TEXT_HUDPOS_RIGHT, TEXT_HUDPOS_RIGHT_WIDE,
    };
    use crate::host::HudState;
    use crate::lines::{FontStyle, Line};
    use crate::settings::Settings;

    fn ctx(settings: &Settings, hud: HudState) -> PlacementContext<'_> {
        PlacementContext {
            settings,
            menu_open: false,
            hud,
            hud_background_opacity: 0.6,
            aspect_ratio: 16.0 / 9.0,
        }
    }

    #[test]
    fn padding_uses_whole_spaces() {
        assert_eq!(padding_spaces(80, 120), 5);
        assert_eq!(padding_spaces(81, 120), 4);
        assert_eq!(padding_spaces(120, 120), 0);

        let mut lines = vec![
            Line {
                text: "a".to_string(),
                style: FontStyle::White,
                width: 80,
            },
            Line {
                text: "b".to_string(),
                style: FontStyle::White,
                width: 120,
            },
        ];
        pad_lines(&mut lines, 120);
        assert_eq!(lines[0].text, "a     ");
        assert_eq!(lines[1].text, "b");
    }

    #[test]
    fn auto_placement_follows_hud_state() {
        let settings = Settings::default();
        let size = Vec2::new(0.4, -0.3);

        let right = place(size, &ctx(&settings, HudState::Hints));
        assert_eq!(right.position, TEXT_HUDPOS_RIGHT);
        assert_eq!(right.offset, Vec2::new(-0.4, 0.0));

        let left = place(size, &ctx(&settings, HudState::Basic));
        assert_eq!(left.position, TEXT_HUDPOS);
        assert_eq!(left.offset, Vec2::ZERO);
        assert_eq!(left.background.offset, Vec2::new(0.2, -0.15));
        assert_eq!(left.background.opacity, 0.6);

        let mut wide = ctx(&settings, HudState::Hints);
        wide.aspect_ratio = 48.0 / 9.0;
        assert_eq!(place(size, &wide).position, TEXT_HUDPOS_RIGHT_WIDE);
    }

    #[test]
    fn custom_styling_and_menu() {
        let mut settings = Settings::default();
        settings.custom_styling = true;
        settings.align_right = true;
        settings.align_bottom = true;
        settings.background_opacity = 1.0;
        let size = Vec2::new(0.4, -0.3);

        let placed = place(size, &ctx(&settings, HudState::Hints));
        assert_eq!(placed.position, settings.screen_pos);
        assert_eq!(placed.offset, Vec2::new(-0.4, 0.3));
        assert_eq!(placed.background.opacity, BG_OPACITY_CAP);

        let mut menu = ctx(&settings, HudState::Hints);
        menu.menu_open = true;
        let placed = place(size, &menu);
        assert_eq!(placed.offset, Vec2::new(-0.4, 0.15));
        assert_eq!(placed.background.opacity, MENU_BG_OPACITY);
    }
}
