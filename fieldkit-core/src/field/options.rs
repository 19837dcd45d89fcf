use std::time::Duration;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::transform::{CustomTransform, TransformOptions};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Called with every committed value. An error is shown on the field as a
/// transient error state with the error's message.
pub type ChangeCallback = Box<dyn FnMut(&str) -> anyhow::Result<()>>;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Search,
    Tel,
    Url,
    Number,
}

impl InputType {
    pub fn is_masked(self) -> bool {
        matches!(self, InputType::Password)
    }
}

/// Side of the input the attached pop opens on.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PopDirection {
    #[default]
    Down,
    Up,
}

#[derive(derive_more::Debug, Builder)]
pub struct FieldOptions {
    /// Label shown above the input.
    #[builder(into, default)]
    pub title: String,
    /// Form field name.
    #[builder(into)]
    pub name: Option<String>,
    /// Initial value, taken as is without running transforms.
    #[builder(into)]
    pub value: Option<String>,
    #[builder(default)]
    pub input_type: InputType,
    #[builder(into)]
    pub placeholder: Option<String>,
    /// Maximum number of grapheme clusters. Zero means no limit.
    pub limit: Option<usize>,
    /// Quiet period after the last keystroke before the change callback runs.
    #[builder(default = DEFAULT_DEBOUNCE)]
    pub debounce: Duration,
    #[builder(default)]
    pub pop_direction: PopDirection,
    #[builder(default)]
    pub transforms: TransformOptions,
    pub custom_transform: Option<CustomTransform>,
    #[debug(skip)]
    pub on_change: Option<ChangeCallback>,
}
