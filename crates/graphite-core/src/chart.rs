// File: crates/graphite-core/src/chart.rs
// Summary: Chart facade: owns config, data and backend; runs draw passes, animations and interaction.
// Notes:
// - Every draw bumps `generation`. Animation runs and image tickets carry the
//   generation they were created for and are ignored once it is stale.

use std::fmt;
use std::str::FromStr;

use crate::animation::{AnimationRun, Effect, FrameStatus, FrameUpdate};
use crate::backend::{Attr, Backend, DropShadow, PathCommand, PointerKind, ShapeId, ShapeKind};
use crate::color::{resolve_paint, Fallback, Paint, Rgba};
use crate::config::{ChartOptions, TooltipEvent};
use crate::data::{sequential_to_grouped, BarData, ChartData, Grouping, ScatterData};
use crate::decor::Decor;
use crate::error::{ConfigError, Result};
use crate::geometry::{Geometry, Rect};
use crate::interact::{DispatchTable, HighlightState, HighlightStyle, Interaction, PointerEvent, Tooltip, TooltipTarget};
use crate::layout::{layout_bars, place_points, Backface, BarParams, ScatterParams, ShapeRecord};
use crate::layout::scatter::{marker_shape, Marker, PlacedPoint, Polyline};
use crate::mapper::baseline_y;
use crate::scale::{compute_axis_scale, Scale};
use crate::types::{PlotArea, HEIGHT, WIDTH};

pub const BAR_CLASS: &str = "bar";
pub const BACKFACE_CLASS: &str = "backface";
pub const POINT_CLASS: &str = "point";
pub const HOTSPOT_CLASS: &str = "hotspot";
pub const DATASET_CLASS: &str = "dataset";
pub const LINE_CLASS: &str = "line";

/// Construction input of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Identifier of the host surface; used in logs.
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn new(id: impl Into<String>, data: impl Into<ChartData>) -> Self {
        Self { id: id.into(), width: WIDTH, height: HEIGHT, data: data.into(), options: ChartOptions::default() }
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }
}

/// Lifecycle points a handler can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    BeforeDraw,
    Draw,
}

impl FromStr for LifecycleEvent {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.strip_prefix("on").unwrap_or(s) {
            "beforedraw" => Ok(LifecycleEvent::BeforeDraw),
            "draw" => Ok(LifecycleEvent::Draw),
            _ => Err(ConfigError::UnknownLifecycleEvent(s.to_string())),
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleEvent::BeforeDraw => "beforedraw",
            LifecycleEvent::Draw => "draw",
        })
    }
}

pub type Callback<B> = Box<dyn FnOnce(&mut Chart<B>)>;
pub type Handler<B> = Box<dyn FnMut(&Chart<B>)>;

/// Options of [`Chart::grow`] and [`Chart::wave`].
pub struct AnimationOptions<B: Backend> {
    /// Frame count; `None` or 0 uses the effect's default.
    pub frames: Option<u32>,
    /// Runs once, after the final frame.
    pub callback: Option<Callback<B>>,
}

impl<B: Backend> Default for AnimationOptions<B> {
    fn default() -> Self {
        Self { frames: None, callback: None }
    }
}

impl<B: Backend> AnimationOptions<B> {
    pub fn frames(mut self, frames: u32) -> Self {
        self.frames = Some(frames);
        self
    }

    pub fn callback(mut self, f: impl FnOnce(&mut Chart<B>) + 'static) -> Self {
        self.callback = Some(Box::new(f));
        self
    }
}

/// Completion handle for an image marker load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageTicket {
    pub generation: u64,
    pub id: u64,
}

/// An image marker waiting for its dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingImage {
    pub ticket: ImageTicket,
    pub href: String,
    pub shape: ShapeId,
    record: usize,
    center: (f64, f64),
    parent: ShapeId,
    tooltip: Option<String>,
}

struct DrawPass {
    scale: Scale,
    x_domain: Option<(f64, f64)>,
}

struct ActiveRun<B: Backend> {
    run: AnimationRun,
    callback: Option<Callback<B>>,
}

/// A bar or scatter chart bound to a drawing backend.
pub struct Chart<B: Backend> {
    backend: B,
    config: ChartConfig,
    area: Option<PlotArea>,
    scale: Option<Scale>,
    records: Vec<ShapeRecord>,
    backfaces: Vec<Backface>,
    dispatch: DispatchTable,
    highlight: HighlightState,
    active: Option<ActiveRun<B>>,
    generation: u64,
    handlers: Vec<(LifecycleEvent, Handler<B>)>,
    pending: Vec<PendingImage>,
    next_ticket: u64,
}

impl<B: Backend> Chart<B> {
    pub fn new(backend: B, config: ChartConfig) -> Self {
        Self {
            backend,
            config,
            area: None,
            scale: None,
            records: Vec::new(),
            backfaces: Vec::new(),
            dispatch: DispatchTable::new(),
            highlight: HighlightState::Idle,
            active: None,
            generation: 0,
            handlers: Vec::new(),
            pending: Vec::new(),
            next_ticket: 0,
        }
    }

    /// Build a chart whose options come from a JSON document.
    pub fn from_json(backend: B, id: &str, data: impl Into<ChartData>, options: &str) -> Result<Self> {
        let options = ChartOptions::from_json(options)?;
        Ok(Self::new(backend, ChartConfig::new(id, data).options(options)))
    }

    // ---- accessors ----------------------------------------------------------

    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn options(&self) -> &ChartOptions { &self.config.options }
    /// Options take effect on the next draw.
    pub fn options_mut(&mut self) -> &mut ChartOptions { &mut self.config.options }
    pub fn data(&self) -> &ChartData { &self.config.data }
    pub fn set_data(&mut self, data: impl Into<ChartData>) { self.config.data = data.into(); }
    pub fn backend(&self) -> &B { &self.backend }
    pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }
    pub fn into_backend(self) -> B { self.backend }
    pub fn area(&self) -> Option<&PlotArea> { self.area.as_ref() }
    /// Scale of the last draw.
    pub fn scale(&self) -> Option<&Scale> { self.scale.as_ref() }
    /// Records of the last draw, at their final (post-animation) geometry.
    pub fn records(&self) -> &[ShapeRecord] { &self.records }
    pub fn backfaces(&self) -> &[Backface] { &self.backfaces }
    pub fn dispatch(&self) -> &DispatchTable { &self.dispatch }
    pub fn highlighted(&self) -> Option<&Tooltip> { self.highlight.tooltip() }
    pub fn generation(&self) -> u64 { self.generation }
    pub fn is_animating(&self) -> bool { self.active.is_some() }
    pub fn pending_images(&self) -> &[PendingImage] { &self.pending }

    /// Event that shows tooltips: configured, or click for bars and mousemove for scatter.
    pub fn tooltip_event(&self) -> PointerKind {
        match (self.config.options.tooltips_event, &self.config.data) {
            (Some(e), _) => e.into(),
            (None, ChartData::Bar(_)) => TooltipEvent::Click.into(),
            (None, ChartData::Scatter(_)) => TooltipEvent::MouseMove.into(),
        }
    }

    // ---- lifecycle ----------------------------------------------------------

    /// Subscribe to a lifecycle point.
    pub fn on(&mut self, event: LifecycleEvent, handler: impl FnMut(&Chart<B>) + 'static) -> &mut Self {
        self.handlers.push((event, Box::new(handler)));
        self
    }

    fn fire(&mut self, event: LifecycleEvent) {
        let mut handlers = std::mem::take(&mut self.handlers);
        for (e, h) in handlers.iter_mut() {
            if *e == event {
                h(self);
            }
        }
        // handlers registered from inside a handler are kept
        handlers.append(&mut self.handlers);
        self.handlers = handlers;
    }

    /// Run `f` against the chart and return it for chaining.
    pub fn exec(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        f(self);
        self
    }

    /// Full re-render from config and data.
    ///
    /// Clears the surface, cancels any running animation (its callback is
    /// dropped), removes the highlight and invalidates pending image loads.
    /// Configuration errors are reported before anything is cleared, so a
    /// rejected draw leaves the previous render in place.
    pub fn draw(&mut self) -> Result<&mut Self> {
        let area = self.config.options.validate(self.config.width, self.config.height)?;
        let pass = self.prepare()?;
        self.fire(LifecycleEvent::BeforeDraw);

        self.generation += 1;
        if self.active.take().is_some() {
            tracing::debug!(chart = %self.config.id, "animation cancelled by redraw");
        }
        self.highlight.forget();
        self.dispatch.clear();
        self.pending.clear();
        self.records.clear();
        self.backfaces.clear();
        self.backend.clear();
        self.area = Some(area);
        self.scale = Some(pass.scale.clone());

        let data = self.config.data.clone();
        match (&data, pass.x_domain) {
            (ChartData::Bar(bars), _) => self.draw_bars(bars, &area, &pass.scale)?,
            (ChartData::Scatter(points), Some(domain)) => self.draw_scatter(points, &area, &pass.scale, domain)?,
            (ChartData::Scatter(_), None) => {}
        }

        tracing::debug!(
            chart = %self.config.id,
            generation = self.generation,
            shapes = self.records.len(),
            tooltips = self.dispatch.len(),
            "chart drawn"
        );
        self.fire(LifecycleEvent::Draw);
        Ok(self)
    }

    /// Scale and x domain of the next pass; every configuration error a draw
    /// can raise surfaces here.
    fn prepare(&self) -> Result<DrawPass> {
        let o = &self.config.options;
        match &self.config.data {
            ChartData::Bar(bars) => {
                let scale = compute_axis_scale(&bars.max_candidates(o.grouping), o.yaxis_min, &o.scale_options())?;
                Ok(DrawPass { scale, x_domain: None })
            }
            ChartData::Scatter(points) => {
                let scale = compute_axis_scale(&points.y_values(), o.yaxis_min, &o.scale_options())?;
                let x_min = o.xaxis_min.0;
                let x_max = o.xaxis_max.map(|b| b.0).or_else(|| points.max_x()).unwrap_or(x_min);
                if !x_min.is_finite() || !x_max.is_finite() {
                    return Err(ConfigError::NonFiniteBound { name: "xaxisMin/xaxisMax" }.into());
                }
                if x_max <= x_min {
                    return Err(ConfigError::EmptyXDomain { min: x_min, max: x_max }.into());
                }
                Ok(DrawPass { scale, x_domain: Some((x_min, x_max)) })
            }
        }
    }

    fn segments(&self, data: &ChartData) -> usize {
        match data {
            ChartData::Bar(bars) => bars.len(),
            ChartData::Scatter(_) => self.config.options.xaxis_labels.len().max(1),
        }
    }

    fn decorate_under(&mut self, area: &PlotArea, scale: &Scale, segments: usize) -> Result<()> {
        let decor = Decor { area, scale, options: &self.config.options, segments };
        decor.background(&mut self.backend)?;
        Ok(())
    }

    fn decorate_over(&mut self, area: &PlotArea, scale: &Scale, segments: usize) -> Result<()> {
        let decor = Decor { area, scale, options: &self.config.options, segments };
        decor.axes(&mut self.backend)?;
        decor.labels(&mut self.backend)?;
        decor.title(&mut self.backend)?;
        Ok(())
    }

    fn shadow(&self) -> DropShadow {
        let o = &self.config.options;
        DropShadow { offset_x: o.shadow_offsetx, offset_y: o.shadow_offsety, blur: o.shadow_blur, opacity: o.shadow_opacity }
    }

    fn draw_bars(&mut self, data: &BarData, area: &PlotArea, scale: &Scale) -> Result<()> {
        let o = &self.config.options;
        let colors: Vec<Paint> = o
            .palette(true)
            .iter()
            .map(|c| resolve_paint(&[Some(c.as_str())], area, Fallback::Black))
            .collect();
        let layout = layout_bars(
            data,
            &BarParams {
                area,
                scale,
                grouping: o.grouping,
                hmargin: o.hmargin,
                hmargin_grouped: o.hmargin_grouped,
                shadow: o.shadow && o.grouping == Grouping::Stacked,
                colors: &colors,
                colors_sequential: o.colors_sequential,
            },
        );
        let segments = self.segments(&self.config.data);
        self.decorate_under(area, scale, segments)?;

        let shadow = self.shadow();
        let o = &self.config.options;
        let stroke = resolve_paint(&[Some(o.strokestyle.as_str())], area, Fallback::Transparent);
        let linewidth = o.linewidth;
        let bar_shadow = o.shadow && o.grouping != Grouping::Stacked;
        let event = self.tooltip_event();

        for mut face in layout.backfaces {
            let r = face.rect;
            let id = self.backend.create_shape(
                ShapeKind::Rect,
                vec![
                    Attr::X(r.x),
                    Attr::Y(r.y),
                    Attr::Width(r.width),
                    Attr::Height(r.height),
                    Attr::Fill(Paint::Solid(Rgba::WHITE)),
                    Attr::StrokeWidth(0.0),
                    Attr::Shadow(shadow),
                    Attr::Class(BACKFACE_CLASS.into()),
                ],
            )?;
            face.id = Some(id);
            self.backfaces.push(face);
        }

        for mut rec in layout.records {
            let Some(r) = rec.rect().copied() else { continue };
            let mut attrs = vec![
                Attr::X(r.x),
                Attr::Y(r.y),
                Attr::Width(r.width),
                Attr::Height(r.height),
                Attr::Fill(rec.fill.clone()),
                Attr::Stroke(stroke.clone()),
                Attr::StrokeWidth(linewidth),
                Attr::Class(BAR_CLASS.into()),
            ];
            if bar_shadow {
                attrs.push(Attr::Shadow(shadow));
            }
            let id = self.backend.create_shape(ShapeKind::Rect, attrs)?;
            rec.id = Some(id);

            if let Some(text) = self.config.options.tooltip(rec.sequential_index) {
                let (dataset_index, datapoint_index) = sequential_to_grouped(rec.sequential_index, data)
                    .unwrap_or((rec.dataset_index, rec.datapoint_index));
                self.dispatch.insert(TooltipTarget {
                    shape: id,
                    hotspot_shape: None,
                    hotspot: r,
                    sequential_index: rec.sequential_index,
                    dataset_index,
                    datapoint_index,
                    text: text.to_string(),
                });
                self.backend.add_event_listener(id, event)?;
            }
            self.records.push(rec);
        }

        self.decorate_over(area, scale, segments)?;
        let decor = Decor { area, scale, options: &self.config.options, segments };
        decor.labels_above(&mut self.backend, data, &self.records)?;
        Ok(())
    }

    fn draw_scatter(&mut self, data: &ScatterData, area: &PlotArea, scale: &Scale, (x_min, x_max): (f64, f64)) -> Result<()> {
        let o = &self.config.options;
        let layout = place_points(data, &ScatterParams { area, scale, x_min, x_max, options: o });
        let segments = self.segments(&self.config.data);
        self.decorate_under(area, scale, segments)?;

        for line in &layout.lines {
            self.draw_polyline(line)?;
        }

        let mut groups: Vec<Option<ShapeId>> = vec![None; data.datasets.len()];
        for point in layout.points {
            let d = point.record.dataset_index;
            let parent = match groups[d] {
                Some(g) => g,
                None => {
                    let g = self.backend.create_shape(ShapeKind::Group, vec![Attr::Class(DATASET_CLASS.into())])?;
                    groups[d] = Some(g);
                    g
                }
            };
            self.draw_point(point, parent)?;
        }

        self.decorate_over(area, scale, segments)?;
        Ok(())
    }

    fn draw_polyline(&mut self, line: &Polyline) -> Result<()> {
        let mut path = Vec::with_capacity(line.points.len());
        for (i, &(x, y)) in line.points.iter().enumerate() {
            path.push(if i == 0 { PathCommand::MoveTo(x, y) } else { PathCommand::LineTo(x, y) });
        }
        self.backend.create_shape(
            ShapeKind::Path,
            vec![
                Attr::Path(path),
                Attr::Stroke(line.color.clone()),
                Attr::StrokeWidth(line.width),
                Attr::Class(LINE_CLASS.into()),
            ],
        )?;
        Ok(())
    }

    fn draw_point(&mut self, point: PlacedPoint, parent: ShapeId) -> Result<()> {
        let (x, y) = point.center();
        let size = point.size();
        let (kind, mut attrs) = marker_shape(&point.marker, x, y, size);
        if point.marker.is_stroked() {
            attrs.push(Attr::Stroke(point.color.clone()));
        } else if kind != ShapeKind::Image {
            attrs.push(Attr::Fill(point.color.clone()));
        }
        attrs.extend([Attr::Opacity(point.opacity), Attr::Parent(parent), Attr::Class(POINT_CLASS.into())]);
        let id = self.backend.create_shape(kind, attrs)?;

        let mut record = point.record;
        record.id = Some(id);
        let index = self.records.len();

        if let Marker::Image(href) = &point.marker {
            self.next_ticket += 1;
            let ticket = ImageTicket { generation: self.generation, id: self.next_ticket };
            tracing::debug!(chart = %self.config.id, href = %href, ticket = ticket.id, "image marker pending");
            self.pending.push(PendingImage {
                ticket,
                href: href.clone(),
                shape: id,
                record: index,
                center: (x, y),
                parent,
                tooltip: point.tooltip,
            });
        } else {
            let hotspot = Rect::centered(x, y, size);
            self.register_point_hotspot(id, hotspot, parent, &record, point.tooltip)?;
        }
        self.records.push(record);
        Ok(())
    }

    fn register_point_hotspot(
        &mut self,
        shape: ShapeId,
        hotspot: Rect,
        parent: ShapeId,
        record: &ShapeRecord,
        tooltip: Option<String>,
    ) -> Result<()> {
        let hotspot_id = self.backend.create_shape(
            ShapeKind::Rect,
            vec![
                Attr::X(hotspot.x),
                Attr::Y(hotspot.y),
                Attr::Width(hotspot.width),
                Attr::Height(hotspot.height),
                Attr::Fill(Paint::TRANSPARENT),
                Attr::Parent(parent),
                Attr::Class(HOTSPOT_CLASS.into()),
            ],
        )?;
        if let Some(text) = tooltip {
            self.dispatch.insert(TooltipTarget {
                shape,
                hotspot_shape: Some(hotspot_id),
                hotspot,
                sequential_index: record.sequential_index,
                dataset_index: record.dataset_index,
                datapoint_index: record.datapoint_index,
                text,
            });
            let event = self.tooltip_event();
            self.backend.add_event_listener(hotspot_id, event)?;
        }
        Ok(())
    }

    // ---- images -------------------------------------------------------------

    /// Place an image marker once its dimensions are known.
    ///
    /// Returns `false` when the ticket belongs to an earlier draw or is unknown.
    pub fn image_loaded(&mut self, ticket: ImageTicket, width: f64, height: f64) -> Result<bool> {
        let Some(pending) = self.take_pending(ticket) else {
            return Ok(false);
        };
        let (cx, cy) = pending.center;
        let rect = Rect::new(cx - width / 2.0, cy - height / 2.0, width, height);
        for attr in [Attr::X(rect.x), Attr::Y(rect.y), Attr::Width(width), Attr::Height(height)] {
            self.backend.set_attribute(pending.shape, attr)?;
        }
        let Some(record) = self.records.get_mut(pending.record) else {
            return Ok(false);
        };
        record.geometry = Geometry::Rect(rect);
        let record = record.clone();
        self.register_point_hotspot(pending.shape, rect, pending.parent, &record, pending.tooltip)?;
        Ok(true)
    }

    /// Drop a failed image load; the point stays unplaced.
    pub fn image_failed(&mut self, ticket: ImageTicket) -> bool {
        match self.take_pending(ticket) {
            Some(p) => {
                tracing::debug!(chart = %self.config.id, href = %p.href, "image marker failed to load");
                true
            }
            None => false,
        }
    }

    fn take_pending(&mut self, ticket: ImageTicket) -> Option<PendingImage> {
        if ticket.generation != self.generation {
            tracing::warn!(chart = %self.config.id, ticket = ticket.id, "stale image completion ignored");
            return None;
        }
        let pos = self.pending.iter().position(|p| p.ticket == ticket)?;
        Some(self.pending.remove(pos))
    }

    // ---- animation ----------------------------------------------------------

    /// Draw, then grow every bar from the baseline.
    pub fn grow(&mut self, opts: AnimationOptions<B>) -> Result<&mut Self> {
        self.animate(Effect::Grow, opts)
    }

    /// Draw, then raise the bars one after another.
    pub fn wave(&mut self, opts: AnimationOptions<B>) -> Result<&mut Self> {
        self.animate(Effect::Wave, opts)
    }

    fn animate(&mut self, effect: Effect, opts: AnimationOptions<B>) -> Result<&mut Self> {
        if let ChartData::Scatter(_) = self.config.data {
            return Err(ConfigError::BarOnly(match effect {
                Effect::Grow => "grow",
                Effect::Wave => "wave",
            })
            .into());
        }
        self.draw()?;
        let baseline = self.scale.as_ref().zip(self.area.as_ref()).map(|(s, a)| baseline_y(s, a));
        let Some(baseline) = baseline else {
            return Ok(self);
        };
        let run = match effect {
            Effect::Grow => AnimationRun::grow(&self.records, &self.backfaces, baseline, opts.frames, self.generation),
            Effect::Wave => {
                let stacked = self.config.options.grouping == Grouping::Stacked;
                AnimationRun::wave(&self.records, baseline, stacked, opts.frames, self.generation)
            }
        };
        tracing::debug!(chart = %self.config.id, effect = ?effect, frames = run.total_frames(), "animation started");
        self.active = Some(ActiveRun { run, callback: opts.callback });
        // frame 0 is applied immediately
        self.advance()?;
        Ok(self)
    }

    /// Host frame callback: apply the next animation frame.
    pub fn tick(&mut self) -> Result<FrameStatus> {
        self.advance()
    }

    fn advance(&mut self) -> Result<FrameStatus> {
        let Some(active) = self.active.as_mut() else {
            return Ok(FrameStatus::Idle);
        };
        if active.run.generation() != self.generation {
            tracing::warn!(chart = %self.config.id, "stale animation run dropped");
            self.active = None;
            return Ok(FrameStatus::Idle);
        }
        let total = active.run.total_frames();
        let Some(update) = active.run.step() else {
            self.active = None;
            return Ok(FrameStatus::Idle);
        };
        self.apply_frame(&update)?;

        if !update.finished {
            return Ok(FrameStatus::Running { frame: update.frame, total });
        }
        let callback = self.active.take().and_then(|a| a.callback);
        tracing::debug!(chart = %self.config.id, "animation finished");
        if let Some(cb) = callback {
            cb(self);
        }
        Ok(FrameStatus::Finished)
    }

    fn apply_frame(&mut self, update: &FrameUpdate) -> Result<()> {
        for &(index, rect) in &update.shapes {
            let Some(id) = self.records.get(index).and_then(|r| r.id) else { continue };
            self.backend.set_attribute(id, Attr::Y(rect.y))?;
            self.backend.set_attribute(id, Attr::Height(rect.height))?;
            self.dispatch.update_mark(id, rect);
            self.highlight.follow(&mut self.backend, id, rect)?;
        }
        for &(index, rect) in &update.backfaces {
            let Some(id) = self.backfaces.get(index).and_then(|b| b.id) else { continue };
            self.backend.set_attribute(id, Attr::Y(rect.y))?;
            self.backend.set_attribute(id, Attr::Height(rect.height))?;
        }
        Ok(())
    }

    // ---- interaction --------------------------------------------------------

    fn highlight_style(&self) -> HighlightStyle {
        let o = &self.config.options;
        let area = self.area.unwrap_or_else(|| PlotArea::new(self.config.width, self.config.height, o.gutters()));
        HighlightStyle {
            fill: resolve_paint(&[Some(o.highlight_fill.as_str())], &area, Fallback::Transparent),
            stroke: resolve_paint(&[Some(o.highlight_stroke.as_str())], &area, Fallback::Transparent),
            linewidth: o.highlight_linewidth,
        }
    }

    /// Hit-test a pointer event against the tooltip hotspots.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Interaction> {
        let hit = self.dispatch.hit_test(event.x, event.y).cloned();
        self.interact(event.kind, hit)
    }

    /// Event reported by a backend that resolved the shape itself.
    pub fn handle_shape_event(&mut self, id: ShapeId, kind: PointerKind) -> Result<Interaction> {
        let hit = self.dispatch.lookup(id).cloned();
        self.interact(kind, hit)
    }

    fn interact(&mut self, kind: PointerKind, hit: Option<TooltipTarget>) -> Result<Interaction> {
        let style = self.highlight_style();
        let configured = self.tooltip_event();
        let outcome = self.highlight.interact(&mut self.backend, kind, configured, hit.as_ref(), &style)?;
        Ok(outcome)
    }

    /// Remove the highlight overlay, if any.
    pub fn remove_highlight(&mut self) -> Result<&mut Self> {
        self.highlight.clear(&mut self.backend)?;
        Ok(self)
    }
}
