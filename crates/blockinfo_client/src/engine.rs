//! Tick driver. Resolves what the player is looking at, reuses or regenerates its text and hands
//! the result to the host outputs.

use std::io;
use std::path::Path;
use std::time::Instant;

use blockinfo_core::replies::{reply_queue, ReplyQueue, ReplySender};
use blockinfo_core::sampling::{SampleBook, SampleReply, Sampler};
use blockinfo_shared::block::{BlockCategory, BlockDefinitionId};
use blockinfo_shared::registry::DefinitionRegistry;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::cache::{FormattedResult, NotificationResult, RichTextResult, TextCache};
use crate::facts::GridSplitCheck;
use crate::format::{self, AimContext, FormatContext, MenuItem, MenuState, MenuView};
use crate::host::{
    AimedBlock, DisplayState, DrawRequest, EquippedTool, GameSession, GridSplitPredictor, LiveData,
    OverlayRenderer, Outputs, Target, TickInput,
};
use crate::layout::{self, PlacementContext};
use crate::lines::{Line, LineBuffer, Lines, NotificationBuffer, RichTextBuffer};
use crate::scroll::{ScrollPhase, ScrollState};
use crate::settings::Settings;

/// Expired cache entries are purged on every this many ticks.
pub const PURGE_INTERVAL_TICKS: u64 = 300;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Rich,
    Notification,
}

impl RenderMode {
    pub fn for_display(settings: &Settings, display: &DisplayState) -> Self {
        if settings.use_rich_text && display.rich_text_available {
            RenderMode::Rich
        } else {
            RenderMode::Notification
        }
    }
}

/// What was on screen last tick. A change restarts scrolling.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Shown {
    Held(BlockDefinitionId, RenderMode),
    Aimed(u64, RenderMode),
    Menu(RenderMode),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub type LiveSampler = Box<dyn Sampler<BlockDefinitionId, LiveData>>;
type LiveReply = SampleReply<BlockDefinitionId, LiveData>;

/// Categories whose text includes data sampled from a spawned block.
pub fn has_live_data(category: BlockCategory) -> bool {
    matches!(category, BlockCategory::ShipConnector | BlockCategory::Thrust)
}

pub struct TextEngine {
    registry: DefinitionRegistry,
    settings: Settings,
    rich_cache: TextCache<RichTextResult>,
    notification_cache: TextCache<NotificationResult>,
    rich_buf: RichTextBuffer,
    notification_buf: NotificationBuffer,
    scroll: ScrollState,
    menu: MenuState,
    split: GridSplitCheck,
    live: FxHashMap<BlockDefinitionId, LiveData>,
    samples: SampleBook<BlockDefinitionId>,
    sampler: Option<LiveSampler>,
    replies_tx: ReplySender<LiveReply>,
    replies: ReplyQueue<LiveReply>,
    shown: Option<Shown>,
    ticks: u64,
    stats: CacheStats,
}

impl TextEngine {
    pub fn new(registry: DefinitionRegistry, settings: Settings) -> Self {
        let (replies_tx, replies) = reply_queue();
        Self {
            registry,
            settings,
            rich_cache: TextCache::default(),
            notification_cache: TextCache::default(),
            rich_buf: RichTextBuffer::new(),
            notification_buf: NotificationBuffer::new(),
            scroll: ScrollState::default(),
            menu: MenuState::default(),
            split: GridSplitCheck::default(),
            live: FxHashMap::default(),
            samples: SampleBook::new(),
            sampler: None,
            replies_tx,
            replies,
            shown: None,
            ticks: 0,
            stats: CacheStats::default(),
        }
    }

    pub fn with_sampler(mut self, sampler: LiveSampler) -> Self {
        self.sampler = Some(sampler);
        self
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn live_data(&self, id: &BlockDefinitionId) -> Option<&LiveData> {
        self.live.get(id)
    }

    /// Replaces the settings, clearing whatever cached text they invalidate.
    pub fn set_settings(&mut self, settings: Settings) {
        if self.settings.affects_content(&settings) {
            info!("text settings changed, clearing text caches");
            self.rich_cache.clear();
            self.notification_cache.clear();
        } else if (self.settings.text_scale - settings.text_scale).abs() > f32::EPSILON {
            // Cached rich sizes were measured at the old scale.
            self.rich_cache.clear();
        }
        self.settings = settings;
        self.shown = None;
    }

    /// Re-reads the settings file. A missing file keeps the current settings.
    pub fn reload_settings(&mut self, path: &Path) -> io::Result<()> {
        match Settings::load(path)? {
            Some(settings) => {
                info!("reloaded settings from {}", path.display());
                self.set_settings(settings);
            }
            None => info!("no settings file at {}, keeping current", path.display()),
        }
        Ok(())
    }

    pub fn menu_toggle(&mut self) {
        let open = !self.menu.is_open();
        self.menu.set_open(open);
        self.shown = None;
    }

    pub fn menu_move(&mut self, delta: i32) {
        self.menu.move_by(delta);
    }

    /// Applies the selected item when it only touches engine state and returns it so the host
    /// can run the rest.
    pub fn menu_select(&mut self) -> MenuItem {
        let item = self.menu.selected_item();
        match item {
            MenuItem::CloseMenu => self.menu.set_open(false),
            MenuItem::TextInfo => {
                let mut settings = self.settings.clone();
                settings.show_text_info = !settings.show_text_info;
                self.set_settings(settings);
            }
            MenuItem::UseRichText => {
                let mut settings = self.settings.clone();
                settings.use_rich_text = !settings.use_rich_text;
                self.set_settings(settings);
            }
            _ => {}
        }
        self.shown = None;
        item
    }

    pub fn tick(&mut self, input: &TickInput<'_>, outputs: &mut Outputs<'_>) {
        self.ticks += 1;
        if self.ticks % PURGE_INTERVAL_TICKS == 0 {
            self.rich_cache.purge_expired(input.now);
            self.notification_cache.purge_expired(input.now);
        }

        self.poll_samples();

        let display = input.display;
        let menu_open = self.menu.is_open();
        if display.cursor_visible || (!self.settings.show_text_info && !menu_open) {
            self.go_idle(outputs);
            return;
        }

        if menu_open || !matches!(input.target, Target::Aimed(_)) {
            // The split answer belongs to one aim session.
            self.split.forget();
        }

        let mode = RenderMode::for_display(&self.settings, display);

        let (shown, result) = if menu_open {
            let result = self.menu_result(mode, display, outputs.overlay);
            (Shown::Menu(mode), result)
        } else {
            match input.target {
                Target::Nothing => {
                    self.go_idle(outputs);
                    return;
                }
                Target::Held(id) => {
                    self.request_sample(id);
                    let Some(result) =
                        self.held_result(id, mode, input.session, input.now, outputs.overlay)
                    else {
                        self.go_idle(outputs);
                        return;
                    };
                    (Shown::Held(id.clone(), mode), result)
                }
                Target::Aimed(block) => {
                    let Some(result) = self.aimed_result(
                        block,
                        mode,
                        input.session,
                        input.tool,
                        outputs.split_predictor,
                        outputs.overlay,
                    ) else {
                        self.go_idle(outputs);
                        return;
                    };
                    (Shown::Aimed(block.instance, mode), result)
                }
            }
        };

        if self.shown.as_ref() != Some(&shown) {
            self.scroll.restart(input.now);
            self.shown = Some(shown);
        }

        self.present(&result, menu_open, input, outputs);
    }

    /// Held-block text for `id`, from the cache when possible.
    pub fn held_result(
        &mut self,
        id: &BlockDefinitionId,
        mode: RenderMode,
        session: &GameSession,
        now: Instant,
        overlay: &mut dyn OverlayRenderer,
    ) -> Option<FormattedResult> {
        let cached = match mode {
            RenderMode::Rich => self.rich_cache.get(id, now).cloned().map(FormattedResult::Rich),
            RenderMode::Notification => self
                .notification_cache
                .get(id, now)
                .cloned()
                .map(FormattedResult::Notification),
        };
        if let Some(result) = cached {
            self.stats.hits += 1;
            return Some(result);
        }

        let def = self.registry.block(id)?;
        self.stats.misses += 1;
        debug!("no cached {mode:?} text for {id}, generating");

        let ctx = FormatContext {
            registry: &self.registry,
            settings: &self.settings,
            session,
            live: self.live.get(id),
        };

        match mode {
            RenderMode::Rich => {
                self.rich_buf.reset();
                format::held_text(&ctx, def, &mut Lines::new(&mut self.rich_buf));
                let result = finish_rich(&mut self.rich_buf, overlay, &self.settings);
                self.rich_cache.put(id.clone(), result.clone(), now);
                Some(FormattedResult::Rich(result))
            }
            RenderMode::Notification => {
                self.notification_buf.reset();
                format::held_text(&ctx, def, &mut Lines::new(&mut self.notification_buf));
                let result = finish_notification(&self.notification_buf);
                self.notification_cache.put(id.clone(), result.clone(), now);
                Some(FormattedResult::Notification(result))
            }
        }
    }

    fn aimed_result(
        &mut self,
        block: &AimedBlock,
        mode: RenderMode,
        session: &GameSession,
        tool: Option<EquippedTool>,
        predictor: &dyn GridSplitPredictor,
        overlay: &mut dyn OverlayRenderer,
    ) -> Option<FormattedResult> {
        let def = self.registry.block(&block.definition)?;
        let ctx = AimContext {
            registry: &self.registry,
            settings: &self.settings,
            session,
            tool,
            split_predictor: predictor,
        };

        let result = match mode {
            RenderMode::Rich => {
                self.rich_buf.reset();
                let mut out = Lines::new(&mut self.rich_buf);
                format::aimed_text(&ctx, def, block, &mut self.split, &mut out);
                FormattedResult::Rich(finish_rich(&mut self.rich_buf, overlay, &self.settings))
            }
            RenderMode::Notification => {
                self.notification_buf.reset();
                let mut out = Lines::new(&mut self.notification_buf);
                format::aimed_text(&ctx, def, block, &mut self.split, &mut out);
                FormattedResult::Notification(finish_notification(&self.notification_buf))
            }
        };
        Some(result)
    }

    fn menu_result(
        &mut self,
        mode: RenderMode,
        display: &DisplayState,
        overlay: &mut dyn OverlayRenderer,
    ) -> FormattedResult {
        let view = MenuView {
            settings: &self.settings,
            toggles: &display.toggles,
            rich_text_available: display.rich_text_available,
        };

        match mode {
            RenderMode::Rich => {
                self.rich_buf.reset();
                format::menu_text(&self.menu, &view, &mut Lines::new(&mut self.rich_buf));
                FormattedResult::Rich(finish_rich(&mut self.rich_buf, overlay, &self.settings))
            }
            RenderMode::Notification => {
                self.notification_buf.reset();
                format::menu_text(&self.menu, &view, &mut Lines::new(&mut self.notification_buf));
                FormattedResult::Notification(finish_notification(&self.notification_buf))
            }
        }
    }

    fn present(
        &mut self,
        result: &FormattedResult,
        menu_open: bool,
        input: &TickInput<'_>,
        outputs: &mut Outputs<'_>,
    ) {
        match result {
            FormattedResult::Rich(rich) => {
                let placement = layout::place(
                    rich.size,
                    &PlacementContext {
                        settings: &self.settings,
                        menu_open,
                        hud: input.display.hud,
                        hud_background_opacity: input.display.hud_background_opacity,
                        aspect_ratio: input.display.aspect_ratio,
                    },
                );
                outputs.hud.hide();
                outputs.overlay.draw(&DrawRequest {
                    runs: &rich.runs,
                    scale: layout::text_scale(&self.settings),
                    position: placement.position,
                    offset: placement.offset,
                    background: (placement.background.opacity > 0.0)
                        .then_some(placement.background),
                });
            }
            FormattedResult::Notification(notification) => {
                let visible = if menu_open {
                    self.scroll.menu_visible(&notification.lines, self.menu.selected())
                } else {
                    self.scroll.visible(&notification.lines, input.now)
                };
                let lines: Vec<&Line> = visible.iter().map(|&i| &notification.lines[i]).collect();
                outputs.overlay.hide();
                outputs.hud.show_lines(&lines);
            }
        }
    }

    fn go_idle(&mut self, outputs: &mut Outputs<'_>) {
        if self.scroll.phase() != ScrollPhase::Idle {
            outputs.overlay.hide();
            outputs.hud.hide();
            self.scroll.go_idle();
        }
        self.split.forget();
        self.shown = None;
    }

    fn request_sample(&mut self, id: &BlockDefinitionId) {
        if !has_live_data(id.category) {
            return;
        }
        let Some(sampler) = &self.sampler else {
            return;
        };
        if self.samples.begin(id) {
            debug!("requesting live data for {id}");
            sampler.request(id.clone(), self.replies_tx.clone());
        }
    }

    /// Stores arrived live data and drops the text generated without it.
    fn poll_samples(&mut self) {
        for reply in self.replies.drain() {
            if !self.samples.complete(&reply.key, reply.value.is_some()) {
                continue;
            }
            let Some(value) = reply.value else {
                continue;
            };

            debug!("live data arrived for {}", reply.key);
            self.rich_cache.invalidate(&reply.key);
            self.notification_cache.invalidate(&reply.key);
            self.live.insert(reply.key, value);
            self.shown = None;
        }
    }
}

fn finish_rich(
    buf: &mut RichTextBuffer,
    overlay: &mut dyn OverlayRenderer,
    settings: &Settings,
) -> RichTextResult {
    let runs = buf.take_runs();
    let size = overlay.measure(&runs, layout::text_scale(settings));
    RichTextResult { runs, size }
}

fn finish_notification(buf: &NotificationBuffer) -> NotificationResult {
    let largest = buf.largest_width();
    let mut lines = buf.lines().to_vec();
    layout::pad_lines(&mut lines, largest);
    NotificationResult { lines }
}
