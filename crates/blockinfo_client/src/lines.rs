//! Line accumulation for both rendering modes.
//!
//! Text routines write through [`Lines`], which forwards to a [`LineBuffer`]. The rich-text buffer
//! keeps colored runs in one growable list; the notification buffer reuses one slot per line and
//! measures each line in pixels when it is closed.

use crate::glyphs::text_width;
use crate::palette::{self, Rgb};

/// Prefix of every notification line.
pub const BULLET: &str = "• ";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    White,
    Red,
    Green,
    Blue,
    DarkBlue,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::White => "White",
            FontStyle::Red => "Red",
            FontStyle::Green => "Green",
            FontStyle::Blue => "Blue",
            FontStyle::DarkBlue => "DarkBlue",
        }
    }
}

/// Index of a line that was closed by [`LineCursor::close`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SealedLine {
    pub index: usize,
}

/// Position of the line being written. Starts before the first line.
#[derive(Clone, Debug)]
pub struct LineCursor {
    index: isize,
    open: bool,
}

impl Default for LineCursor {
    fn default() -> Self {
        Self {
            index: -1,
            open: false,
        }
    }
}

impl LineCursor {
    pub fn reset(&mut self) {
        self.index = -1;
        self.open = false;
    }

    /// Advances to the next line and marks it open. The caller closes any open line first.
    pub fn open(&mut self) -> usize {
        assert!(!self.open, "opening a line while another is still open");
        self.index += 1;
        self.open = true;
        self.index as usize
    }

    pub fn close(&mut self) -> Option<SealedLine> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(SealedLine {
            index: self.index as usize,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of lines opened since the last reset.
    pub fn count(&self) -> usize {
        (self.index + 1) as usize
    }
}

/// One colored run of rich text. `None` means the default color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    pub color: Option<Rgb>,
    pub text: String,
}

/// One measured notification line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: FontStyle,
    pub width: u32,
}

pub trait LineBuffer {
    /// Closes any open line and opens the next one.
    fn add_line(&mut self, style: FontStyle);
    fn append(&mut self, text: &str);
    fn set_color(&mut self, color: Option<Rgb>);
    fn color(&self) -> Option<Rgb>;
    fn end_line(&mut self);
    fn reset(&mut self);
    fn line_count(&self) -> usize;
    fn is_rich(&self) -> bool;
}

#[derive(Default)]
pub struct RichTextBuffer {
    cursor: LineCursor,
    runs: Vec<StyledRun>,
    color: Option<Rgb>,
}

impl RichTextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[StyledRun] {
        assert!(!self.cursor.is_open(), "reading runs with a line still open");
        &self.runs
    }

    pub fn take_runs(&mut self) -> Vec<StyledRun> {
        assert!(!self.cursor.is_open(), "reading runs with a line still open");
        std::mem::take(&mut self.runs)
    }

    fn push_text(&mut self, text: &str) {
        match self.runs.last_mut() {
            Some(run) if run.color == self.color => run.text.push_str(text),
            _ => self.runs.push(StyledRun {
                color: self.color,
                text: text.to_string(),
            }),
        }
    }
}

impl LineBuffer for RichTextBuffer {
    fn add_line(&mut self, _style: FontStyle) {
        if self.cursor.is_open() {
            self.end_line();
        }
        self.cursor.open();
    }

    fn append(&mut self, text: &str) {
        assert!(self.cursor.is_open(), "append without an open line");
        if !text.is_empty() {
            self.push_text(text);
        }
    }

    fn set_color(&mut self, color: Option<Rgb>) {
        self.color = color;
    }

    fn color(&self) -> Option<Rgb> {
        self.color
    }

    fn end_line(&mut self) {
        if self.cursor.close().is_none() {
            return;
        }
        self.color = None;
        self.push_text("\n");
    }

    fn reset(&mut self) {
        self.cursor.reset();
        self.runs.clear();
        self.color = None;
    }

    fn line_count(&self) -> usize {
        self.cursor.count()
    }

    fn is_rich(&self) -> bool {
        true
    }
}

/// Text of the runs with "<color=r,g,b>" and "<reset>" tags.
pub fn to_markup(runs: &[StyledRun]) -> String {
    let mut out = String::new();
    let mut current = None;
    for run in runs {
        if run.color != current {
            match run.color {
                Some(color) => out.push_str(&format!("<color={color}>")),
                None => out.push_str("<reset>"),
            }
            current = run.color;
        }
        out.push_str(&run.text);
    }
    out
}

/// Text of the runs without any styling.
pub fn plain_text(runs: &[StyledRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

#[derive(Default)]
pub struct NotificationBuffer {
    cursor: LineCursor,
    slots: Vec<Line>,
    largest_width: u32,
    color: Option<Rgb>,
}

impl NotificationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn largest_width(&self) -> u32 {
        assert!(!self.cursor.is_open(), "reading widths with a line still open");
        self.largest_width
    }

    /// Closed lines since the last reset.
    pub fn lines(&self) -> &[Line] {
        assert!(!self.cursor.is_open(), "reading lines with a line still open");
        &self.slots[..self.cursor.count()]
    }

    fn open_slot(&mut self) -> &mut Line {
        let index = self.cursor.count() - 1;
        &mut self.slots[index]
    }
}

impl LineBuffer for NotificationBuffer {
    fn add_line(&mut self, style: FontStyle) {
        if self.cursor.is_open() {
            self.end_line();
        }
        let index = self.cursor.open();
        if index == self.slots.len() {
            self.slots.push(Line {
                text: String::new(),
                style,
                width: 0,
            });
        }
        let slot = &mut self.slots[index];
        slot.text.clear();
        slot.text.push_str(BULLET);
        slot.style = style;
        slot.width = 0;
    }

    fn append(&mut self, text: &str) {
        assert!(self.cursor.is_open(), "append without an open line");
        self.open_slot().text.push_str(text);
    }

    // Fonts carry the color in this mode.
    fn set_color(&mut self, color: Option<Rgb>) {
        self.color = color;
    }

    fn color(&self) -> Option<Rgb> {
        self.color
    }

    fn end_line(&mut self) {
        let Some(sealed) = self.cursor.close() else {
            return;
        };
        self.color = None;
        let slot = &mut self.slots[sealed.index];
        slot.width = text_width(&slot.text);
        self.largest_width = self.largest_width.max(slot.width);
    }

    fn reset(&mut self) {
        self.cursor.reset();
        self.largest_width = 0;
        self.color = None;
    }

    fn line_count(&self) -> usize {
        self.cursor.count()
    }

    fn is_rich(&self) -> bool {
        false
    }
}

/// Chaining writer used by every text routine.
pub struct Lines<'a> {
    buf: &'a mut dyn LineBuffer,
}

impl<'a> Lines<'a> {
    pub fn new(buf: &'a mut dyn LineBuffer) -> Self {
        Self { buf }
    }

    pub fn is_rich(&self) -> bool {
        self.buf.is_rich()
    }

    pub fn count(&self) -> usize {
        self.buf.line_count()
    }

    pub fn add_line(&mut self) -> &mut Self {
        self.buf.add_line(FontStyle::White);
        self
    }

    pub fn add_styled(&mut self, style: FontStyle) -> &mut Self {
        self.buf.add_line(style);
        self
    }

    pub fn append(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.append(text.as_ref());
        self
    }

    pub fn color(&mut self, color: Rgb) -> &mut Self {
        self.buf.set_color(Some(color));
        self
    }

    pub fn reset_color(&mut self) -> &mut Self {
        self.buf.set_color(None);
        self
    }

    /// "text: "
    pub fn label(&mut self, text: &str) -> &mut Self {
        self.buf.append(text);
        self.buf.append(": ");
        self
    }

    /// "text*: " with the marker dimmed, for values that do not come from definitions.
    pub fn label_hardcoded(&mut self, text: &str) -> &mut Self {
        let previous = self.buf.color();
        self.buf.append(text);
        self.buf.set_color(Some(palette::UNIMPORTANT));
        self.buf.append("*");
        self.buf.set_color(previous);
        self.buf.append(": ");
        self
    }

    pub fn separator(&mut self) -> &mut Self {
        self.buf.append(crate::units::SEPARATOR);
        self
    }

    pub fn end_line(&mut self) {
        self.buf.end_line();
    }
}
