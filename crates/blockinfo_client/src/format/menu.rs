//! The in-game quick menu.
//!
//! Notification mode writes exactly one line per item between the title and the navigation line,
//! which is what [`crate::scroll::ScrollState::menu_visible`] windows over.

use crate::host::MenuToggles;
use crate::lines::{FontStyle, Lines};
use crate::palette;
use crate::settings::Settings;

pub const CMD_BUILDINFO: &str = "/bi";
pub const CMD_GETBLOCK: &str = "/bi getblock";
pub const CMD_MODLINK: &str = "/bi modlink";
pub const CMD_HELP: &str = "/bi help";
pub const CMD_RELOAD: &str = "/bi reload";

/// Default game keys for cube rotation, which also drive the menu.
pub const NAV_UP: &str = "PageUp";
pub const NAV_DOWN: &str = "PageDown";
pub const NAV_CHANGE: &str = "Delete";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuItem {
    CloseMenu,
    AddAimedToToolbar,
    OpenModLink,
    HelpTopics,
    TextInfo,
    DrawOverlays,
    PlacementTransparency,
    FreezePlacement,
    UseRichText,
    ReloadSettings,
}

pub const MENU_ITEMS: [MenuItem; 10] = [
    MenuItem::CloseMenu,
    MenuItem::AddAimedToToolbar,
    MenuItem::OpenModLink,
    MenuItem::HelpTopics,
    MenuItem::TextInfo,
    MenuItem::DrawOverlays,
    MenuItem::PlacementTransparency,
    MenuItem::FreezePlacement,
    MenuItem::UseRichText,
    MenuItem::ReloadSettings,
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
    selected: usize,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// 0-based index into [`MENU_ITEMS`].
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> MenuItem {
        MENU_ITEMS[self.selected]
    }

    /// Moves the selection, wrapping at both ends.
    pub fn move_by(&mut self, delta: i32) {
        let count = MENU_ITEMS.len() as i64;
        let next = (self.selected as i64 + i64::from(delta)).rem_euclid(count);
        self.selected = next as usize;
    }
}

/// Host and settings state shown next to the menu items.
#[derive(Copy, Clone, Debug)]
pub struct MenuView<'a> {
    pub settings: &'a Settings,
    pub toggles: &'a MenuToggles,
    pub rich_text_available: bool,
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

fn item_line<'o, 'a>(
    out: &'o mut Lines<'a>,
    state: &MenuState,
    item: MenuItem,
    enabled: bool,
) -> &'o mut Lines<'a> {
    let selected = state.selected_item() == item;
    let font = if selected {
        FontStyle::Green
    } else if enabled {
        FontStyle::White
    } else {
        FontStyle::Red
    };

    out.add_styled(font);
    if selected {
        out.color(palette::GOOD).append("  > ")
    } else {
        out.color(if enabled {
            palette::NORMAL
        } else {
            palette::UNIMPORTANT
        })
        .append("      ")
    }
}

fn hint(out: &mut Lines<'_>, text: &str) {
    out.color(palette::UNIMPORTANT)
        .append("   (")
        .append(text)
        .append(")")
        .end_line();
}

fn section(out: &mut Lines<'_>, title: &str) {
    out.add_line().end_line();
    out.add_line().color(palette::BLOCKTITLE).append(title).end_line();
}

pub fn menu_text(state: &MenuState, view: &MenuView<'_>, out: &mut Lines<'_>) {
    let rich = out.is_rich();
    let settings = view.settings;

    out.add_styled(FontStyle::Blue)
        .color(palette::BLOCKTITLE)
        .append("Build info mod")
        .end_line();

    item_line(out, state, MenuItem::CloseMenu, true).append("Close menu");
    if settings.menu_bind.is_empty() {
        hint(out, CMD_BUILDINFO);
    } else {
        hint(out, &settings.menu_bind);
    }

    if rich {
        section(out, "Actions:");
    }

    item_line(out, state, MenuItem::AddAimedToToolbar, true).append("Add aimed block to toolbar");
    hint(out, CMD_GETBLOCK);

    item_line(out, state, MenuItem::OpenModLink, true).append("Open block's mod workshop link");
    hint(out, CMD_MODLINK);

    item_line(out, state, MenuItem::HelpTopics, true).append("Help topics");
    hint(out, CMD_HELP);

    if rich {
        section(out, "Settings:");
    }

    item_line(out, state, MenuItem::TextInfo, true)
        .append("Text info: ")
        .append(on_off(settings.show_text_info))
        .end_line();

    item_line(out, state, MenuItem::DrawOverlays, true)
        .append("Draw overlays: ")
        .append(&view.toggles.overlay_mode);
    if settings.cycle_overlays_bind.is_empty() {
        out.end_line();
    } else {
        hint(out, &settings.cycle_overlays_bind);
    }

    item_line(out, state, MenuItem::PlacementTransparency, true)
        .append("Placement transparency: ")
        .append(on_off(view.toggles.placement_transparency))
        .end_line();

    item_line(out, state, MenuItem::FreezePlacement, true)
        .append("Freeze in position: ")
        .append(on_off(view.toggles.freeze_placement))
        .end_line();

    item_line(out, state, MenuItem::UseRichText, view.rich_text_available).append("Use TextAPI: ");
    if view.rich_text_available {
        out.append(on_off(settings.use_rich_text));
    } else {
        out.append("OFF (Mod not detected)");
    }
    out.end_line();

    item_line(out, state, MenuItem::ReloadSettings, true).append("Reload settings file");
    hint(out, CMD_RELOAD);

    if rich {
        out.add_line().end_line();
    }

    out.add_styled(FontStyle::Blue)
        .color(palette::INFO)
        .append("Navigation: Up/down = ")
        .append(NAV_UP)
        .append("/")
        .append(NAV_DOWN)
        .append(", change = ")
        .append(NAV_CHANGE)
        .reset_color()
        .append("          ")
        .end_line();
}

#[cfg(test)]
mod tests {
    use super::{menu_text, MenuItem, MenuState, MenuView, MENU_ITEMS};
    use crate::host::MenuToggles;
    use crate::lines::{plain_text, FontStyle, Lines, NotificationBuffer, RichTextBuffer};
    use crate::scroll::MENU_ITEM_COUNT;
    use crate::settings::Settings;

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = MenuState::default();
        assert_eq!(state.selected_item(), MenuItem::CloseMenu);

        state.move_by(-1);
        assert_eq!(state.selected_item(), MenuItem::ReloadSettings);
        state.move_by(1);
        assert_eq!(state.selected(), 0);
        state.move_by(23);
        assert_eq!(state.selected(), 3);
        assert_eq!(MENU_ITEMS.len(), MENU_ITEM_COUNT);
    }

    #[test]
    fn notification_menu_is_one_line_per_item() {
        let settings = Settings::default();
        let toggles = MenuToggles::default();
        let view = MenuView {
            settings: &settings,
            toggles: &toggles,
            rich_text_available: false,
        };
        let mut state = MenuState::default();
        state.move_by(4);

        let mut buf = NotificationBuffer::new();
        {
            let mut out = Lines::new(&mut buf);
            menu_text(&state, &view, &mut out);
        }
        let lines = buf.lines();
        assert_eq!(lines.len(), MENU_ITEM_COUNT + 2);
        assert_eq!(lines[1].text, "•       Close menu   (Plus)");
        assert_eq!(lines[5].text, "•   > Text info: ON");
        assert_eq!(lines[5].style, FontStyle::Green);
        assert_eq!(lines[9].text, "•       Use TextAPI: OFF (Mod not detected)");
        assert_eq!(lines[9].style, FontStyle::Red);
    }

    #[test]
    fn rich_menu_has_sections() {
        let settings = Settings::default();
        let toggles = MenuToggles::default();
        let view = MenuView {
            settings: &settings,
            toggles: &toggles,
            rich_text_available: true,
        };

        let mut buf = RichTextBuffer::new();
        {
            let mut out = Lines::new(&mut buf);
            menu_text(&MenuState::default(), &view, &mut out);
        }
        let text = plain_text(buf.runs());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Build info mod");
        assert_eq!(lines[1], "  > Close menu   (Plus)");
        assert_eq!(lines[3], "Actions:");
        assert_eq!(lines[8], "Settings:");
        assert_eq!(lines[10], "      Draw overlays: OFF   (Ctrl+Shift+Plus)");
        assert_eq!(lines[13], "      Use TextAPI: ON");
    }
}
