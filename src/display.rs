//! Display rendering
//!
//! Screen layout, top to bottom: menu bar, text rows (gutter plus text),
//! status bar, minibuffer.

use unicode_width::UnicodeWidthStr;

use crate::editor::EditorState;
use crate::error::Result;
use crate::gutter;
use crate::line::char_width;
use crate::menu;
use crate::syntax::{Color, Span, Style};
use crate::terminal::Terminal;

/// Editor palette
mod palette {
    use crate::syntax::Color;

    pub const TEXT_BG: Color = Color::Rgb(0x22, 0x22, 0x22);
    pub const TEXT_FG: Color = Color::Rgb(0xA6, 0xB4, 0xC3);
    pub const GUTTER_BG: Color = Color::Rgb(0xC0, 0xC0, 0xC0);
    pub const GUTTER_FG: Color = Color::Black;
    pub const BAR_BG: Color = Color::Rgb(0xC0, 0xC0, 0xC0);
    pub const BAR_FG: Color = Color::Black;
}

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
}

impl Display {
    pub fn new() -> Self {
        Self { needs_redraw: true }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Render the editor display
    pub fn render(&mut self, terminal: &mut Terminal, editor: &EditorState) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows() as usize;
        if rows < 3 || cols == 0 {
            return Ok(());
        }

        terminal.set_cursor_visible(false)?;
        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        self.render_menu_bar(terminal, editor, cols)?;
        self.render_text(terminal, editor, cols)?;
        self.render_status_bar(terminal, editor, rows - 2, cols)?;
        self.render_minibuffer(terminal, editor, rows - 1, cols)?;
        self.position_cursor(terminal, editor, rows, cols)?;

        terminal.set_cursor_visible(true)?;
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// Menu titles, the open one in reverse video
    fn render_menu_bar(
        &self,
        terminal: &mut Terminal,
        editor: &EditorState,
        cols: usize,
    ) -> Result<()> {
        let bar = Style::fg(palette::BAR_FG).with_bg(palette::BAR_BG);
        terminal.move_cursor(0, 0)?;

        let mut col = 0;
        for (idx, (m, start)) in menu::MENUS.iter().zip(menu::title_columns()).enumerate() {
            // Titles are drawn with one space either side
            let title = format!(" {} ", m.title);
            let title_start = start.saturating_sub(1);
            if title_start + title.len() > cols {
                break;
            }
            terminal.write_styled(&" ".repeat(title_start.saturating_sub(col)), &bar)?;
            let style = if editor.menu() == Some(idx) {
                Style {
                    reverse: true,
                    ..bar
                }
            } else {
                bar
            };
            terminal.write_styled(&title, &style)?;
            col = title_start + title.len();
        }
        terminal.write_styled(&" ".repeat(cols.saturating_sub(col)), &bar)?;
        Ok(())
    }

    /// Gutter and text rows
    fn render_text(
        &self,
        terminal: &mut Terminal,
        editor: &EditorState,
        cols: usize,
    ) -> Result<()> {
        let window = &editor.window;
        let buffer = &editor.buffer;
        let gutter_width = editor.gutter_width();
        let gutter_style = Style::fg(palette::GUTTER_FG).with_bg(palette::GUTTER_BG);
        let text_style = Style::fg(palette::TEXT_FG).with_bg(palette::TEXT_BG);
        let current_style = if editor.config.highlight_current_line {
            text_style.with_bg(editor.line_color())
        } else {
            text_style
        };

        for row in 0..window.height() {
            let line_idx = window.top_line() + row;
            terminal.move_cursor((row + 1) as u16, 0)?;

            let line = buffer.line(line_idx);
            let label = gutter_text(line.map(|_| line_idx), gutter_width, cols);
            terminal.write_styled(&label, &gutter_style)?;

            let Some(line) = line else {
                terminal.write_styled(&" ".repeat(window.width()), &text_style)?;
                continue;
            };

            let base = if line_idx == window.cursor_line() {
                current_style
            } else {
                text_style
            };
            let runs = styled_runs(
                line.text(),
                editor.highlighter.spans(line_idx),
                base,
                window.left_col(),
                window.width(),
                editor.tab_width(),
            );
            for (text, style) in &runs {
                terminal.write_styled(text, style)?;
            }
        }
        Ok(())
    }

    fn render_status_bar(
        &self,
        terminal: &mut Terminal,
        editor: &EditorState,
        row: usize,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row as u16, 0)?;
        terminal.write_styled(&status_bar_text(editor, cols), &Style::reverse())?;
        Ok(())
    }

    fn render_minibuffer(
        &self,
        terminal: &mut Terminal,
        editor: &EditorState,
        row: usize,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row as u16, 0)?;
        if let Some(text) = minibuffer_text(editor) {
            terminal.write_str(&truncate_to_width(&text, cols))?;
        }
        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Position the hardware cursor at the correct location
    fn position_cursor(
        &self,
        terminal: &mut Terminal,
        editor: &EditorState,
        rows: usize,
        cols: usize,
    ) -> Result<()> {
        let last_col = cols.saturating_sub(1);

        if let Some(prompt) = editor.prompt() {
            let col = prompt.text().width().min(last_col);
            return terminal.move_cursor((rows - 1) as u16, col as u16);
        }
        if editor.menu().is_some() {
            return terminal.move_cursor((rows - 1) as u16, 0);
        }

        let window = &editor.window;
        let row = window.row_of_line(window.cursor_line()).unwrap_or(0) + 1;
        let col =
            editor.gutter_width() + editor.cursor_display_col().saturating_sub(window.left_col());
        terminal.move_cursor(row as u16, col.min(last_col) as u16)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Status bar: cursor position on the left, file on the right
fn status_bar_text(editor: &EditorState, cols: usize) -> String {
    let left = format!(" {}", editor.status_text());
    let modified = if editor.buffer.is_modified() {
        " [Modified]"
    } else {
        ""
    };
    let right = format!(
        "{}{}  {} ",
        editor.buffer.name(),
        modified,
        editor.highlighter.language_name()
    );

    let gap = cols.saturating_sub(left.width() + right.width());
    if gap == 0 {
        return pad_to_width(&truncate_to_width(&left, cols), cols);
    }
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// Gutter cell for one row, clipped to the screen width
///
/// Rows past the end of the buffer get a blank gutter.
fn gutter_text(line_idx: Option<usize>, gutter_width: usize, cols: usize) -> String {
    let label = match line_idx {
        Some(idx) => gutter::label(idx, gutter_width),
        None => " ".repeat(gutter_width),
    };
    truncate_to_width(&label, cols)
}

/// What the bottom line shows: open menu, prompt, or message
fn minibuffer_text(editor: &EditorState) -> Option<String> {
    if let Some(text) = editor.menu_text() {
        return Some(text);
    }
    if let Some(prompt) = editor.prompt() {
        let mut text = prompt.text();
        if !prompt.candidates.is_empty() {
            text.push_str(&format!("  {{{}}}", prompt.candidates.join(" | ")));
        }
        return Some(text);
    }
    editor.message().map(str::to_string)
}

/// Split a line into styled pieces covering `width` screen columns from `left_col`
///
/// Tabs become spaces, wide characters cut by the left edge become spaces,
/// and the row is padded with `base` to the full width.
fn styled_runs(
    text: &str,
    spans: &[Span],
    base: Style,
    left_col: usize,
    width: usize,
    tab_width: usize,
) -> Vec<(String, Style)> {
    let mut runs: Vec<(String, Style)> = Vec::new();
    let end_col = left_col + width;
    let mut col = 0;
    let mut span_idx = 0;

    for (byte, ch) in text.char_indices() {
        if col >= end_col {
            break;
        }
        while spans.get(span_idx).is_some_and(|s| s.end <= byte) {
            span_idx += 1;
        }
        let style = match spans.get(span_idx) {
            Some(span) if span.contains(byte) => overlay(base, span.style()),
            _ => base,
        };

        let w = char_width(ch, col, tab_width);
        let start = col.max(left_col);
        let stop = (col + w).min(end_col);
        if stop > start {
            let whole = start == col && stop == col + w;
            let piece = match ch {
                '\t' => " ".repeat(stop - start),
                _ if !whole => " ".repeat(stop - start),
                c if c.is_control() => "?".to_string(),
                c => c.to_string(),
            };
            push_run(&mut runs, &piece, style);
        }
        col += w;
    }

    let used = col.min(end_col).saturating_sub(left_col);
    if used < width {
        push_run(&mut runs, &" ".repeat(width - used), base);
    }
    runs
}

fn push_run(runs: &mut Vec<(String, Style)>, text: &str, style: Style) {
    match runs.last_mut() {
        Some((last, last_style)) if *last_style == style => last.push_str(text),
        _ => runs.push((text.to_string(), style)),
    }
}

/// Token style drawn over the line's base style
fn overlay(base: Style, token: Style) -> Style {
    let pick = |own: Color, under: Color| if own == Color::Default { under } else { own };
    Style {
        fg: pick(token.fg, base.fg),
        bg: pick(token.bg, base.bg),
        bold: base.bold || token.bold,
        italic: base.italic || token.italic,
        reverse: base.reverse || token.reverse,
    }
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}
