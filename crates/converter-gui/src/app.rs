use std::path::{Path, PathBuf};

use converter_core::loader::INPUT_EXTENSIONS;
use converter_core::ratio::PRESETS;
use converter_core::{
    AspectRatio, ConversionRequest, ConvertError, Converter, ConverterConfig, OutputFormat, crop,
    open_image,
};
use eframe::egui;
use image::DynamicImage;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("please choose an input file to crop")]
    MissingInput,

    #[error("please choose an input file and an output location")]
    MissingPaths,

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Ratio selector entry: a preset or the free-form text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioChoice {
    Preset(AspectRatio),
    Custom,
}

impl RatioChoice {
    fn label(&self) -> String {
        match self {
            RatioChoice::Preset(ratio) => ratio.to_string(),
            RatioChoice::Custom => "Custom".to_string(),
        }
    }
}

/// Input image cropped in memory, waiting to be converted.
pub struct CroppedImage {
    pub image: DynamicImage,
    pub ratio: AspectRatio,
}

pub struct ConverterApp {
    converter: Converter,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
    ratio_choice: RatioChoice,
    custom_ratio: String,
    cropped: Option<CroppedImage>,
}

impl ConverterApp {
    pub fn new(config: ConverterConfig) -> Self {
        ConverterApp {
            converter: Converter::new(config),
            input: None,
            output: None,
            format: OutputFormat::Png,
            ratio_choice: RatioChoice::Preset(PRESETS[0]),
            custom_ratio: String::new(),
            cropped: None,
        }
    }

    /// Use a new input file; any previous crop no longer applies.
    pub fn set_input(&mut self, path: PathBuf) {
        self.input = Some(path);
        self.cropped = None;
    }

    /// Use a new output file, adding the format's extension if missing.
    pub fn set_output(&mut self, path: &Path) {
        self.output = Some(self.format.with_default_extension(path));
    }

    /// Switch the output format. The chosen output path is dropped because
    /// its extension belongs to the old format.
    pub fn set_format(&mut self, format: OutputFormat) {
        if format != self.format {
            self.format = format;
            self.output = None;
        }
    }

    /// Ratio currently selected, parsing the custom text if chosen.
    pub fn selected_ratio(&self) -> Result<AspectRatio, ConvertError> {
        match self.ratio_choice {
            RatioChoice::Preset(ratio) => Ok(ratio),
            RatioChoice::Custom => self.custom_ratio.parse(),
        }
    }

    /// Crop the input file to the selected ratio and keep the result.
    ///
    /// Leaves any earlier crop untouched on failure.
    pub fn crop_input(&mut self) -> Result<AspectRatio, AppError> {
        let Some(input) = &self.input else {
            return Err(AppError::MissingInput);
        };
        let ratio = self.selected_ratio()?;
        let source = open_image(input)?;

        self.cropped = Some(CroppedImage {
            image: crop(&source, ratio),
            ratio,
        });
        Ok(ratio)
    }

    /// Convert the cropped image if there is one, else the input file.
    pub fn convert(&self) -> Result<PathBuf, AppError> {
        let (Some(input), Some(output)) = (&self.input, &self.output) else {
            return Err(AppError::MissingPaths);
        };

        match &self.cropped {
            Some(cropped) => self
                .converter
                .convert_image(&cropped.image, output, self.format)?,
            None => self
                .converter
                .convert(&ConversionRequest::new(input, output, self.format))?,
        }
        Ok(output.clone())
    }

    fn pick_input(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Choose input image")
            .add_filter("Images", INPUT_EXTENSIONS)
            .pick_file();
        if let Some(path) = picked {
            self.set_input(path);
        }
    }

    fn pick_output(&mut self) {
        let filter_name = match self.format {
            OutputFormat::Icns => "ICNS files",
            _ => "Images",
        };
        let picked = rfd::FileDialog::new()
            .set_title("Choose output location")
            .add_filter(filter_name, &[self.format.extension()])
            .save_file();
        if let Some(path) = picked {
            self.set_output(&path);
        }
    }

    fn on_crop(&mut self) {
        match self.crop_input() {
            Ok(ratio) => log::info!("Cropped input to {}", ratio),
            Err(e) => show_message(rfd::MessageLevel::Error, "Crop failed", &e.to_string()),
        }
    }

    fn on_convert(&mut self) {
        match self.convert() {
            Ok(path) => show_message(
                rfd::MessageLevel::Info,
                "Done",
                &format!("Conversion complete: {}", path.display()),
            ),
            Err(AppError::MissingPaths) => show_message(
                rfd::MessageLevel::Warning,
                "Warning",
                "Please choose an input file and an output location",
            ),
            Err(e) => {
                log::error!("Conversion failed: {}", e);
                let message = format!("Conversion failed: {}", e);
                show_message(rfd::MessageLevel::Error, "Error", &message);
            }
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Image Converter");
            ui.separator();

            ui.label(match &self.input {
                Some(path) => format!("Input: {}", file_label(path)),
                None => "No input file selected".to_string(),
            });
            if ui.button("Choose input file").clicked() {
                self.pick_input();
            }

            ui.add_space(6.0);
            ui.label(match &self.output {
                Some(path) => format!("Output: {}", file_label(path)),
                None => "No output file selected".to_string(),
            });
            if ui.button("Choose output location").clicked() {
                self.pick_output();
            }

            ui.add_space(6.0);
            let mut format = self.format;
            egui::ComboBox::from_label("Output format")
                .selected_text(format.name())
                .show_ui(ui, |ui| {
                    for option in OutputFormat::ALL {
                        ui.selectable_value(&mut format, option, option.name());
                    }
                });
            self.set_format(format);

            ui.separator();
            ui.horizontal(|ui| {
                egui::ComboBox::from_label("Aspect ratio")
                    .selected_text(self.ratio_choice.label())
                    .show_ui(ui, |ui| {
                        for preset in PRESETS {
                            let choice = RatioChoice::Preset(*preset);
                            ui.selectable_value(&mut self.ratio_choice, choice, choice.label());
                        }
                        ui.selectable_value(&mut self.ratio_choice, RatioChoice::Custom, "Custom");
                    });
                if self.ratio_choice == RatioChoice::Custom {
                    ui.add(egui::TextEdit::singleline(&mut self.custom_ratio).hint_text("W:H"));
                }
            });

            let can_crop = self.input.is_some();
            if ui.add_enabled(can_crop, egui::Button::new("Crop")).clicked() {
                self.on_crop();
            }
            if let Some(cropped) = &self.cropped {
                ui.label(format!(
                    "Cropped to {} ({}x{})",
                    cropped.ratio,
                    cropped.image.width(),
                    cropped.image.height()
                ));
            }

            ui.separator();
            if ui.button("Convert").clicked() {
                self.on_convert();
            }
        });
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn show_message(level: rfd::MessageLevel, title: &str, description: &str) {
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
