//! Interactive page preview: click to place the header, hover for guides

use eframe::egui::{self, Color32, Pos2, Rect, Shape, Stroke};
use pdf_header::overlay::{CanvasPoint, OverlayScene, Rgba, Segment, TextMark, rotate_about};
use pdf_header::{DateInputs, FrameStyle, HeaderSession, Intent, Rotation};

use pdf_header::constants::GUIDE_DASH_PX;

/// Rasterized first page of the open document
#[derive(Default)]
pub struct CanvasState {
    pub texture: Option<egui::TextureHandle>,
    /// Why the page could not be rendered, when it could not
    pub unavailable: Option<String>,
    pub loading: bool,
    /// Pointer position over the canvas, for the coordinate readout
    pub hover: Option<CanvasPoint>,
    last_size: Option<egui::Vec2>,
}

impl CanvasState {
    pub fn start_loading(&mut self) {
        self.texture = None;
        self.unavailable = None;
        self.loading = true;
    }

    pub fn set_page(&mut self, ctx: &egui::Context, image: egui::ColorImage) {
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("pdf_page", image, egui::TextureOptions::LINEAR));
            }
        }
        self.unavailable = None;
        self.loading = false;
    }

    pub fn set_unavailable(&mut self, reason: String) {
        self.texture = None;
        self.unavailable = Some(reason);
        self.loading = false;
    }
}

fn color(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, c.3)
}

pub fn show_canvas(
    ui: &mut egui::Ui,
    session: &HeaderSession,
    state: &mut CanvasState,
    dates: &DateInputs,
    intents: &mut Vec<Intent>,
) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
    let rect = response.rect;

    if state.last_size != Some(rect.size()) {
        state.last_size = Some(rect.size());
        intents.push(Intent::CanvasResized {
            width: rect.width(),
            height: rect.height(),
        });
    }

    painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);
    state.hover = None;

    if session.queue().is_empty() {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Open PDF files or a folder to start",
            egui::FontId::proportional(18.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }
    if session.page_size().is_none() {
        let message = if state.loading {
            "Loading page..."
        } else {
            "No preview"
        };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            message,
            egui::FontId::proportional(16.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let to_screen = |p: CanvasPoint| rect.min + egui::vec2(p.x, p.y);
    let hover = response
        .hover_pos()
        .map(|pos| CanvasPoint::new(pos.x - rect.min.x, pos.y - rect.min.y));
    state.hover = hover;

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            intents.push(Intent::PositionClicked {
                cx: pos.x - rect.min.x,
                cy: pos.y - rect.min.y,
            });
        }
    }

    let scene = session.scene(dates, hover);
    paint_page(&painter, &scene, state, &to_screen);
    paint_overlay(&painter, &scene, session.config().rotation, &to_screen);
}

fn paint_page(
    painter: &egui::Painter,
    scene: &OverlayScene,
    state: &CanvasState,
    to_screen: &impl Fn(CanvasPoint) -> Pos2,
) {
    let (x0, y0, x1, y1) = scene.page.bounds();
    let page_rect = Rect::from_min_max(
        to_screen(CanvasPoint::new(x0, y0)),
        to_screen(CanvasPoint::new(x1, y1)),
    );

    match &state.texture {
        Some(texture) => {
            painter.image(
                texture.id(),
                page_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        None => {
            painter.rect_filled(page_rect, 0.0, Color32::WHITE);
            if let Some(reason) = &state.unavailable {
                painter.text(
                    page_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("Page preview unavailable\n{}", reason),
                    egui::FontId::proportional(13.0),
                    Color32::GRAY,
                );
            }
        }
    }
    painter.rect_stroke(
        page_rect,
        0.0,
        Stroke::new(1.0, Color32::from_gray(120)),
        egui::StrokeKind::Outside,
    );
}

fn paint_overlay(
    painter: &egui::Painter,
    scene: &OverlayScene,
    rotation: Rotation,
    to_screen: &impl Fn(CanvasPoint) -> Pos2,
) {
    let segment = |s: &Segment| [to_screen(s.from), to_screen(s.to)];

    for guide in &scene.guides {
        painter.extend(Shape::dashed_line(
            &segment(guide),
            Stroke::new(1.0, Color32::from_rgb(80, 140, 220)),
            GUIDE_DASH_PX,
            GUIDE_DASH_PX,
        ));
    }

    if let Some((quad, fill)) = &scene.background {
        let points = quad.corners.iter().map(|p| to_screen(*p)).collect();
        painter.add(Shape::convex_polygon(points, color(*fill), Stroke::NONE));
    }

    if let Some(frame) = &scene.frame {
        let mut points: Vec<Pos2> = frame.quad.corners.iter().map(|p| to_screen(*p)).collect();
        let stroke = Stroke::new(frame.width_px, color(frame.color));
        match frame.style {
            FrameStyle::Solid => {
                painter.add(Shape::closed_line(points, stroke));
            }
            FrameStyle::Dashed => {
                points.push(points[0]);
                painter.extend(Shape::dashed_line(
                    &points,
                    stroke,
                    frame.width_px * 3.0,
                    frame.width_px * 2.0,
                ));
            }
        }
    }

    if let Some(text) = &scene.text {
        paint_text(painter, text, rotation, to_screen);
    }

    for underline in &scene.underlines {
        let stroke_color = scene
            .text
            .as_ref()
            .map(|t| color(t.color))
            .unwrap_or(Color32::BLACK);
        painter.line_segment(
            segment(underline),
            Stroke::new(scene.underline_width_px, stroke_color),
        );
    }

    for arm in &scene.crosshair {
        painter.line_segment(segment(arm), Stroke::new(1.5, color(scene.crosshair_color)));
    }
}

fn paint_text(
    painter: &egui::Painter,
    text: &TextMark,
    rotation: Rotation,
    to_screen: &impl Fn(CanvasPoint) -> Pos2,
) {
    let block_h = text.lines.len() as f32 * text.line_height_px;
    // egui turns text clockwise, the scene angle is counter-clockwise
    let angle = -text.angle_deg.to_radians();
    let fill = color(text.color);

    for (i, line) in text.lines.iter().enumerate() {
        let mut job = egui::text::LayoutJob::default();
        job.append(
            line,
            0.0,
            egui::TextFormat {
                font_id: egui::FontId::proportional(text.font_px),
                color: fill,
                italics: text.italic,
                extra_letter_spacing: text.letter_spacing_px,
                ..Default::default()
            },
        );
        let galley = painter.layout_job(job);
        let size = galley.size();

        let dx = -size.x / 2.0;
        let dy = -block_h / 2.0
            + i as f32 * text.line_height_px
            + (text.line_height_px - size.y) / 2.0;
        let origin = to_screen(rotate_about(text.anchor, dx, dy, rotation));

        if text.bold {
            // Overprint one pixel along the baseline to thicken the strokes
            let nudge = to_screen(rotate_about(text.anchor, dx + 1.0, dy, rotation));
            painter.add(
                egui::epaint::TextShape::new(nudge, galley.clone(), fill).with_angle(angle),
            );
        }
        painter.add(egui::epaint::TextShape::new(origin, galley, fill).with_angle(angle));
    }
}
