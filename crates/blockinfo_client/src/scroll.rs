//! Which notification lines are visible this tick.
//!
//! The HUD shows at most [`MAX_LINES`] lines. Longer text keeps its first
//! [`SCROLL_FROM_LINE`] lines pinned and rotates the rest every [`SCROLL_INTERVAL`].

use std::time::{Duration, Instant};

use crate::lines::Line;

pub const MAX_LINES: usize = 8;
pub const SCROLL_FROM_LINE: usize = 2;
pub const SCROLL_INTERVAL: Duration = Duration::from_millis(1500);
/// Freshly generated text holds still this long before the first advance.
pub const SCROLL_START_DELAY: Duration = Duration::from_secs(1);

/// Lines before the first menu item.
pub const MENU_ITEMS_START: usize = 1;
pub const MENU_ITEM_COUNT: usize = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScrollPhase {
    #[default]
    Idle,
    ShowingStatic,
    ShowingScrolled,
}

#[derive(Clone, Debug)]
pub struct ScrollState {
    top_line: usize,
    next_scroll: Option<Instant>,
    phase: ScrollPhase,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            top_line: SCROLL_FROM_LINE,
            next_scroll: None,
            phase: ScrollPhase::Idle,
        }
    }
}

impl ScrollState {
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Starts over for newly generated text.
    pub fn restart(&mut self, now: Instant) {
        self.top_line = SCROLL_FROM_LINE;
        self.next_scroll = Some(now + SCROLL_START_DELAY);
    }

    pub fn go_idle(&mut self) {
        self.phase = ScrollPhase::Idle;
    }

    /// Indices of the lines to show, advancing the scroll position when it is due.
    pub fn visible(&mut self, lines: &[Line], now: Instant) -> Vec<usize> {
        let total = lines.iter().filter(|line| !line.text.is_empty()).count();

        if total <= MAX_LINES {
            self.phase = ScrollPhase::ShowingStatic;
            return (0..total).collect();
        }

        self.phase = ScrollPhase::ShowingScrolled;
        if self.top_line >= total {
            self.top_line = SCROLL_FROM_LINE;
        }

        let mut shown: Vec<usize> = (0..SCROLL_FROM_LINE).collect();
        let mut index = self.top_line;
        for _ in SCROLL_FROM_LINE..MAX_LINES {
            if lines[index].text.is_empty() {
                break;
            }
            shown.push(index);
            index += 1;
            if index >= total {
                index = SCROLL_FROM_LINE;
            }
        }

        if self.next_scroll.map_or(true, |at| at < now) {
            self.top_line += 1;
            if self.top_line >= total {
                self.top_line = SCROLL_FROM_LINE;
            }
            self.next_scroll = Some(now + SCROLL_INTERVAL);
        }

        shown
    }

    /// Menu lines around `selected`, a 0-based item index. The menu never scrolls.
    pub fn menu_visible(&mut self, lines: &[Line], selected: usize) -> Vec<usize> {
        self.phase = ScrollPhase::ShowingStatic;

        let total = lines.iter().filter(|line| !line.text.is_empty()).count();
        let first = MENU_ITEMS_START;
        let last = MENU_ITEM_COUNT;
        let sel = first + selected;

        (0..total)
            .filter(|&l| {
                l < first
                    || l > last
                    || (sel == last && l + 2 == sel)
                    || l + 1 == sel
                    || l == sel
                    || l == sel + 1
                    || (sel == first && l == sel + 2)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ScrollPhase, ScrollState, MAX_LINES, MENU_ITEM_COUNT, SCROLL_FROM_LINE};
    use crate::lines::{FontStyle, Line};

    fn lines(count: usize) -> Vec<Line> {
        (0..count)
            .map(|i| Line {
                text: format!("line {i}"),
                style: FontStyle::White,
                width: 40,
            })
            .collect()
    }

    #[test]
    fn short_text_is_static() {
        let mut scroll = ScrollState::default();
        let text = lines(MAX_LINES);
        let shown = scroll.visible(&text, Instant::now());
        assert_eq!(shown, (0..MAX_LINES).collect::<Vec<_>>());
        assert_eq!(scroll.phase(), ScrollPhase::ShowingStatic);
    }

    #[test]
    fn long_text_pins_header_and_shows_a_window() {
        let base = Instant::now();
        let mut scroll = ScrollState::default();
        scroll.restart(base);

        let text = lines(12);
        let shown = scroll.visible(&text, base);
        assert_eq!(shown, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(scroll.phase(), ScrollPhase::ShowingScrolled);
        // Start delay not over yet.
        assert_eq!(scroll.top_line(), SCROLL_FROM_LINE);

        let shown = scroll.visible(&text, base + Duration::from_millis(1100));
        assert_eq!(shown, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(scroll.top_line(), 3);

        let shown = scroll.visible(&text, base + Duration::from_millis(1200));
        assert_eq!(shown, vec![0, 1, 3, 4, 5, 6, 7, 8]);
        assert_eq!(scroll.top_line(), 3);
    }

    #[test]
    fn window_wraps_past_the_end() {
        let base = Instant::now();
        let mut scroll = ScrollState::default();
        let text = lines(10);

        let mut now = base;
        for _ in 0..6 {
            scroll.visible(&text, now);
            now += Duration::from_secs(2);
        }
        assert_eq!(scroll.top_line(), 8);
        assert_eq!(scroll.visible(&text, now), vec![0, 1, 8, 9, 2, 3, 4, 5]);
    }

    #[test]
    fn top_line_returns_after_full_cycle() {
        let base = Instant::now();
        let mut scroll = ScrollState::default();
        let total = 11;
        let text = lines(total);

        let mut now = base;
        for _ in 0..(total - SCROLL_FROM_LINE) {
            scroll.visible(&text, now);
            now += Duration::from_secs(2);
        }
        assert_eq!(scroll.top_line(), SCROLL_FROM_LINE);
    }

    #[test]
    fn menu_window_follows_selection() {
        let mut scroll = ScrollState::default();
        // Title, ten items, navigation.
        let text = lines(MENU_ITEM_COUNT + 2);

        assert_eq!(scroll.menu_visible(&text, 0), vec![0, 1, 2, 3, 11]);
        assert_eq!(scroll.menu_visible(&text, 4), vec![0, 4, 5, 6, 11]);
        assert_eq!(scroll.menu_visible(&text, 9), vec![0, 8, 9, 10, 11]);
    }
}
