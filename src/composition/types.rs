// Core types for the ad composition workflow

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six fixed image positions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotId {
    Scenario,
    Model,
    Clothing1,
    Clothing2,
    Clothing3,
    Accessory,
}

impl SlotId {
    /// All slots, in the order images are sent to the generation backend
    pub const ALL: [SlotId; 6] = [
        SlotId::Scenario,
        SlotId::Model,
        SlotId::Clothing1,
        SlotId::Clothing2,
        SlotId::Clothing3,
        SlotId::Accessory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SlotId::Scenario => "Scenario",
            SlotId::Model => "Model",
            SlotId::Clothing1 => "Clothing 1",
            SlotId::Clothing2 => "Clothing 2",
            SlotId::Clothing3 => "Clothing 3",
            SlotId::Accessory => "Accessory",
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An accepted image, held as base64 text plus its media type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub encoded_payload: String,
    pub mime_type: String,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            encoded_payload: BASE64.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Renderable preview, always derived from payload and media type
    pub fn preview_url(&self) -> String {
        data_url(&self.mime_type, &self.encoded_payload)
    }

    pub fn to_inline(&self) -> InlineImage {
        InlineImage {
            mime_type: self.mime_type.clone(),
            data: self.encoded_payload.clone(),
        }
    }
}

/// Image payload as handed to a generation backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

/// A generated image returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageReference {
    pub mime_type: String,
    pub data: String,
}

impl ImageReference {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn data_url(&self) -> String {
        data_url(&self.mime_type, &self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(self.data.as_bytes())
    }

    /// File extension for the returned media type
    pub fn extension(&self) -> &'static str {
        image::ImageFormat::from_mime_type(&self.mime_type)
            .and_then(|format| format.extensions_str().first().copied())
            .unwrap_or("bin")
    }
}

fn data_url(mime_type: &str, data: &str) -> String {
    format!("data:{};base64,{}", mime_type, data)
}

/// Both composites produced by one submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResult {
    pub artistic: ImageReference,
    pub expository: ImageReference,
}

/// Workflow status; exactly one is active at a time
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum WorkflowState {
    #[default]
    Idle,
    InProgress,
    Succeeded(GenerationResult),
    Failed(String),
}

impl WorkflowState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, WorkflowState::InProgress)
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            WorkflowState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Visual style requested for the artistic composite
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PhotoStyle {
    #[default]
    CinematicHighContrast,
    EtherealSoftFocus,
    MinimalistCleanStudio,
    GrittyUrbanRealism,
    VintageFilmGrain,
    SurrealAvantGarde,
    DynamicActionShot,
}

impl PhotoStyle {
    pub const ALL: [PhotoStyle; 7] = [
        PhotoStyle::CinematicHighContrast,
        PhotoStyle::EtherealSoftFocus,
        PhotoStyle::MinimalistCleanStudio,
        PhotoStyle::GrittyUrbanRealism,
        PhotoStyle::VintageFilmGrain,
        PhotoStyle::SurrealAvantGarde,
        PhotoStyle::DynamicActionShot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PhotoStyle::CinematicHighContrast => "Cinematic High Contrast",
            PhotoStyle::EtherealSoftFocus => "Ethereal Soft Focus",
            PhotoStyle::MinimalistCleanStudio => "Minimalist Clean Studio",
            PhotoStyle::GrittyUrbanRealism => "Gritty Urban Realism",
            PhotoStyle::VintageFilmGrain => "Vintage Film Grain",
            PhotoStyle::SurrealAvantGarde => "Surreal & Avant-Garde",
            PhotoStyle::DynamicActionShot => "Dynamic Action Shot",
        }
    }
}

impl fmt::Display for PhotoStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhotoStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PhotoStyle::ALL
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown style '{}'", wanted))
    }
}

/// Accent color swatch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccentColor {
    #[default]
    White,
    Black,
    CrimsonRed,
    RoyalBlue,
    ForestGreen,
    Gold,
    HotPink,
    DeepPurple,
    BurntOrange,
    Teal,
}

impl AccentColor {
    pub const ALL: [AccentColor; 10] = [
        AccentColor::White,
        AccentColor::Black,
        AccentColor::CrimsonRed,
        AccentColor::RoyalBlue,
        AccentColor::ForestGreen,
        AccentColor::Gold,
        AccentColor::HotPink,
        AccentColor::DeepPurple,
        AccentColor::BurntOrange,
        AccentColor::Teal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AccentColor::White => "White",
            AccentColor::Black => "Black",
            AccentColor::CrimsonRed => "Crimson Red",
            AccentColor::RoyalBlue => "Royal Blue",
            AccentColor::ForestGreen => "Forest Green",
            AccentColor::Gold => "Gold",
            AccentColor::HotPink => "Hot Pink",
            AccentColor::DeepPurple => "Deep Purple",
            AccentColor::BurntOrange => "Burnt Orange",
            AccentColor::Teal => "Teal",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            AccentColor::White => "#FFFFFF",
            AccentColor::Black => "#000000",
            AccentColor::CrimsonRed => "#DC143C",
            AccentColor::RoyalBlue => "#4169E1",
            AccentColor::ForestGreen => "#228B22",
            AccentColor::Gold => "#FFD700",
            AccentColor::HotPink => "#FF69B4",
            AccentColor::DeepPurple => "#800080",
            AccentColor::BurntOrange => "#CC5500",
            AccentColor::Teal => "#008080",
        }
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.hex())
    }
}

impl FromStr for AccentColor {
    type Err = String;

    /// Accepts a swatch name or its hex value, with or without the leading '#'
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let hex = wanted.trim_start_matches('#');
        AccentColor::ALL
            .into_iter()
            .find(|color| {
                color.name().eq_ignore_ascii_case(wanted)
                    || color.hex()[1..].eq_ignore_ascii_case(hex)
            })
            .ok_or_else(|| format!("unknown color '{}'", wanted))
    }
}
