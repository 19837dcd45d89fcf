use std::{io::Read, path::Path, time::Duration};

use fieldkit_core::{
    field::{ChangeCallback, DEFAULT_DEBOUNCE, FieldOptions, InputType, PopDirection},
    transform::{Builtin, Pipeline, TransformError, TransformOptions},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cli;

#[derive(Error, Debug)]
pub enum ConfigReadError {
    #[error("Deserialization error, {0}")]
    Deserialization(#[from] serde_path_to_error::Error<ron::Error>),
    #[error("Failed to deserialize ron config file, {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("IO error, {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid transform in config, {0}")]
    Transform(#[from] TransformError),
}

/// On disk representation of a single field. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub title: String,
    pub name: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub input_type: InputType,
    pub limit: Option<usize>,
    pub debounce_ms: u64,
    pub pop_direction: PopDirection,
    pub transforms: TransformOptions,
    /// Builtin transforms by name, appended after the ones enabled in
    /// `transforms`.
    pub pipeline: Vec<String>,
    /// Attaches a choice pop listing these values when not empty.
    pub choices: Vec<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            title: "Field".to_owned(),
            name: None,
            value: None,
            placeholder: Some("Type something".to_owned()),
            input_type: InputType::default(),
            limit: None,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            pop_direction: PopDirection::default(),
            transforms: TransformOptions::default(),
            pipeline: Vec::new(),
            choices: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub title: String,
    pub name: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub input_type: InputType,
    pub limit: Option<usize>,
    pub debounce: Duration,
    pub pop_direction: PopDirection,
    pub transforms: TransformOptions,
    pub pipeline: Vec<Builtin>,
    pub choices: Vec<String>,
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self, ConfigReadError> {
        let file = std::fs::File::open(path)?;
        let mut read = std::io::BufReader::new(file);
        let mut buf = Vec::new();
        read.read_to_end(&mut buf)?;

        Self::from_bytes(&buf)
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, ConfigReadError> {
        Ok(serde_path_to_error::deserialize(&mut ron::de::Deserializer::from_bytes(buf)?)?)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Resolves transform names and applies command line overrides. Fails on
    /// the first unknown transform name.
    pub fn into_config(
        self,
        limit: Option<usize>,
        value: Option<String>,
    ) -> Result<Config, ConfigReadError> {
        let pipeline =
            self.pipeline.iter().map(|name| name.parse()).collect::<Result<Vec<Builtin>, _>>()?;

        Ok(Config {
            title: self.title,
            name: self.name,
            value: value.or(self.value),
            placeholder: self.placeholder,
            input_type: self.input_type,
            limit: limit.or(self.limit).filter(|limit| *limit > 0),
            debounce: Duration::from_millis(self.debounce_ms),
            pop_direction: self.pop_direction,
            transforms: self.transforms,
            pipeline,
            choices: self.choices,
        })
    }
}

impl Config {
    /// Transforms in the order a field built from this config runs them.
    pub fn build_pipeline(&self) -> Result<Pipeline, TransformError> {
        let mut pipeline = Pipeline::new();
        pipeline.append(self.transforms)?;
        for builtin in &self.pipeline {
            pipeline.append(*builtin)?;
        }
        Ok(pipeline)
    }

    pub fn field_options(&self, on_change: ChangeCallback) -> FieldOptions {
        FieldOptions::builder()
            .title(self.title.clone())
            .maybe_name(self.name.clone())
            .maybe_value(self.value.clone())
            .maybe_placeholder(self.placeholder.clone())
            .input_type(self.input_type)
            .maybe_limit(self.limit)
            .debounce(self.debounce)
            .pop_direction(self.pop_direction)
            .transforms(self.transforms)
            .on_change(on_change)
            .build()
    }
}
