use glam::Vec2;
use keepsake_engine::{build_text_entities, EngineContext, FontConfig, HostEvent, InputEvent, RenderLayer};

use crate::config::LetterSettings;
use crate::content::ScreenCopy;
use crate::decor::{self, WORLD};
use crate::events::{element, host, input, is_custom, reveal};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

const GLYPH_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 17.0;
const MARGIN_X: f32 = 80.0;
const TOP: f32 = 150.0;
const GLYPH_TAG: &str = "letter";

/// Top-left corner of every character of `text`, or `None` for whitespace.
///
/// Words wrap at `max_cols`; explicit newlines start a new line.
pub fn layout(text: &str, max_cols: usize, origin: Vec2, advance: f32, line_height: f32) -> Vec<Option<Vec2>> {
    let chars: Vec<char> = text.chars().collect();
    let mut slots = Vec::with_capacity(chars.len());
    let (mut col, mut row) = (0usize, 0usize);

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '\n' => {
                col = 0;
                row += 1;
                slots.push(None);
            }
            c if c.is_whitespace() => {
                if col > 0 {
                    col += 1;
                }
                slots.push(None);
            }
            _ => {
                let starts_word = i == 0 || chars[i - 1].is_whitespace();
                if starts_word && col > 0 {
                    let word = chars[i..].iter().take_while(|c| !c.is_whitespace()).count();
                    if col + word > max_cols {
                        col = 0;
                        row += 1;
                    }
                }
                slots.push(Some(origin + Vec2::new(col as f32 * advance, row as f32 * line_height)));
                col += 1;
            }
        }
    }
    slots
}

/// The letter, typed out a few characters at a time.
pub struct LetterView {
    chars: Vec<char>,
    slots: Vec<Option<Vec2>>,
    per_tick: usize,
    tick_secs: f32,
    copy: ScreenCopy,
    font: FontConfig,
    revealed: usize,
    since_tick: f32,
    footer_shown: bool,
}

impl LetterView {
    pub fn new(settings: &LetterSettings, letter: &str, copy: ScreenCopy) -> Self {
        let font = FontConfig::default();
        let advance = font.advance(GLYPH_SIZE);
        let max_cols = (((WORLD.x - 2.0 * MARGIN_X) / advance) as usize).max(1);
        Self {
            chars: letter.chars().collect(),
            slots: layout(letter, max_cols, Vec2::new(MARGIN_X, TOP), advance, LINE_HEIGHT),
            per_tick: settings.chars_per_tick as usize,
            tick_secs: settings.tick_secs,
            copy,
            font,
            revealed: 0,
            since_tick: 0.0,
            footer_shown: false,
        }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.chars.len()
    }

    /// The text shown so far.
    pub fn visible_text(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }

    fn reveal_more(&mut self, ctx: &mut EngineContext, count: usize) {
        let end = (self.revealed + count).min(self.chars.len());
        let mut glyphs = Vec::new();
        for i in self.revealed..end {
            let Some(pos) = self.slots[i] else {
                continue;
            };
            let mut buf = [0u8; 4];
            let text = self.chars[i].encode_utf8(&mut buf);
            glyphs.extend(build_text_entities(
                text,
                pos,
                GLYPH_SIZE,
                &self.font,
                RenderLayer::Overlay,
                GLYPH_TAG,
                || ctx.next_id(),
            ));
        }
        ctx.scene.spawn_all(glyphs);
        self.revealed = end;
        ctx.emit_event(HostEvent::new(
            host::LETTER_PROGRESS,
            self.revealed as f32,
            self.chars.len() as f32,
            0.0,
        ));
    }

    fn show_footer(&mut self, ctx: &mut EngineContext) {
        self.footer_shown = true;
        log::info!("letter fully revealed ({} characters)", self.chars.len());
        let footer = ScreenCopy {
            title: String::new(),
            subtitle: self.copy.body.clone(),
            body: String::new(),
        };
        super::spawn_copy(ctx, &footer, WORLD.y - 60.0, "footer");
        ctx.emit_event(reveal(element::LETTER_FOOTER));
    }
}

impl StageView for LetterView {
    fn stage(&self) -> StageId {
        StageId::Letter
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        let heading = ScreenCopy {
            body: String::new(),
            ..self.copy.clone()
        };
        super::spawn_copy(ctx, &heading, 40.0, "heading");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal {
        if !self.is_complete() {
            self.since_tick += ctx.dt();
            let ticks = (self.since_tick / self.tick_secs).floor();
            let remaining = self.chars.len() - self.revealed;
            let due = if ticks.is_finite() {
                (ticks as usize).saturating_mul(self.per_tick).min(remaining)
            } else {
                remaining
            };
            if ticks >= 1.0 {
                self.since_tick = (self.since_tick - ticks * self.tick_secs).max(0.0);
            }
            if due > 0 {
                self.reveal_more(ctx, due);
            }
        }
        if self.is_complete() && !self.footer_shown {
            self.show_footer(ctx);
        }

        if self.footer_shown && input.iter().any(|e| is_custom(e, input::CONTINUE)) {
            return StageSignal::Complete;
        }
        StageSignal::Running
    }
}
