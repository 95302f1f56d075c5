use eframe::egui;
use pdf_header::{FileState, Preset, units};

/// Builder for creating sliders with automatic change tracking
pub struct SliderBuilder<'a, T> {
    value: &'a mut T,
    range: std::ops::RangeInclusive<T>,
    text: String,
    suffix: Option<String>,
}

impl<'a, T> SliderBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T, range: std::ops::RangeInclusive<T>) -> Self {
        Self {
            value,
            range,
            text: String::new(),
            suffix: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut slider = egui::Slider::new(self.value, self.range);

        if !self.text.is_empty() {
            slider = slider.text(self.text);
        }

        if let Some(suffix) = self.suffix {
            slider = slider.suffix(suffix);
        }

        ui.add(slider).changed()
    }
}

/// Builder for creating drag values with automatic formatting
pub struct DragValueBuilder<'a, T> {
    value: &'a mut T,
    range: Option<std::ops::RangeInclusive<T>>,
    suffix: Option<String>,
    speed: Option<f32>,
}

impl<'a, T> DragValueBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T) -> Self {
        Self {
            value,
            range: None,
            suffix: None,
            speed: None,
        }
    }

    pub fn range(mut self, range: std::ops::RangeInclusive<T>) -> Self {
        self.range = Some(range);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut drag = egui::DragValue::new(self.value);

        if let Some(range) = self.range {
            drag = drag.range(range);
        }

        if let Some(suffix) = self.suffix {
            drag = drag.suffix(suffix);
        }

        if let Some(speed) = self.speed {
            drag = drag.speed(speed);
        }

        ui.add(drag).changed()
    }
}

/// Labeled drag value with range, suffix and speed
pub fn labeled_drag_clamped(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut f32,
    range: std::ops::RangeInclusive<f32>,
    suffix: &str,
    speed: f32,
) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        DragValueBuilder::new(value)
            .range(range)
            .suffix(suffix)
            .speed(speed)
            .show(ui)
    })
    .inner
}

/// Enum selector using ComboBox
pub fn enum_selector<T>(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut T,
    options: &[(T, &str)],
) -> bool
where
    T: PartialEq + Clone,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);

        let current_text = options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, text)| *text)
            .unwrap_or("Custom");

        egui::ComboBox::from_id_salt(id)
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                for (option_value, option_text) in options {
                    if ui
                        .selectable_value(value, option_value.clone(), *option_text)
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
    });
    changed
}

/// Color swatch bound to a `#rrggbb` string
pub fn hex_color_edit(ui: &mut egui::Ui, label: &str, hex: &mut String) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        let (r, g, b) = units::hex_to_rgb(hex).unwrap_or((0, 0, 0));
        let mut rgb = [r, g, b];
        if egui::color_picker::color_edit_button_srgb(ui, &mut rgb).changed() {
            *hex = units::rgb_to_hex(rgb[0], rgb[1], rgb[2]);
            true
        } else {
            false
        }
    })
    .inner
}

/// 3x3 grid of anchor presets; returns the clicked one
pub struct PresetGrid {
    selected: Option<Preset>,
}

impl PresetGrid {
    pub fn new(selected: Option<Preset>) -> Self {
        Self { selected }
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<Preset> {
        let mut clicked = None;
        egui::Grid::new("preset_grid")
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                for row in Preset::ALL.chunks(3) {
                    for preset in row {
                        let button = egui::Button::new(preset.label())
                            .min_size(egui::vec2(32.0, 28.0))
                            .selected(self.selected == Some(*preset));
                        if ui
                            .add(button)
                            .on_hover_text(preset.key().replace('_', " "))
                            .clicked()
                        {
                            clicked = Some(*preset);
                        }
                    }
                    ui.end_row();
                }
            });
        clicked
    }
}

/// Color used for a file's state badge
pub fn state_color(state: FileState) -> egui::Color32 {
    match state {
        FileState::Untreated => egui::Color32::GRAY,
        FileState::Done => egui::Color32::from_rgb(46, 160, 67),
        FileState::Skipped => egui::Color32::from_rgb(210, 153, 34),
        FileState::Error => egui::Color32::from_rgb(218, 54, 51),
    }
}
