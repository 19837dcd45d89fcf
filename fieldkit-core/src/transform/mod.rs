use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

mod builtin;
mod char_map;
mod pipeline;

pub use builtin::{normalize_whitespace, slugify, strip_html, trim};
pub use pipeline::Pipeline;

/// Context a transform runs in. Live runs happen on every keystroke and
/// transforms may skip expensive or disruptive work there. Final runs happen
/// on blur, paste and programmatic value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Live,
    Final,
}

impl Mode {
    pub fn is_live(self) -> bool {
        matches!(self, Mode::Live)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Unknown transform '{0}'")]
    UnknownTransform(String),
}

/// Transforms shipped with the crate. Declaration order is the order in which
/// they are applied when enabled through [`TransformOptions`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Builtin {
    Slugify,
    #[serde(alias = "noHtml")]
    StripHtml,
    #[serde(alias = "fix")]
    NormalizeWhitespace,
    Trim,
}

impl Builtin {
    pub fn apply(self, text: &str, mode: Mode) -> String {
        match self {
            Builtin::Slugify => slugify(text),
            Builtin::StripHtml => strip_html(text),
            Builtin::NormalizeWhitespace => normalize_whitespace(text),
            Builtin::Trim => trim(text, mode),
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl FromStr for Builtin {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noHtml" => return Ok(Builtin::StripHtml),
            "fix" => return Ok(Builtin::NormalizeWhitespace),
            _ => {}
        }

        Builtin::iter()
            .find(|builtin| builtin.name() == s)
            .ok_or_else(|| TransformError::UnknownTransform(s.to_owned()))
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller supplied transform.
#[derive(Clone, derive_more::Debug)]
pub struct CustomTransform {
    name: String,
    #[debug(skip)]
    func: Arc<dyn Fn(&str, Mode) -> String + Send + Sync>,
}

impl CustomTransform {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&str, Mode) -> String + Send + Sync + 'static,
    ) -> Self {
        Self { name: name.into(), func: Arc::new(func) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, text: &str, mode: Mode) -> String {
        (self.func)(text, mode)
    }
}

/// Boolean selector keys, one per [`Builtin`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub slugify: bool,
    #[serde(alias = "no_html")]
    pub strip_html: bool,
    #[serde(alias = "fix")]
    pub normalize_whitespace: bool,
    pub trim: bool,
}

impl TransformOptions {
    pub fn is_enabled(&self, builtin: Builtin) -> bool {
        match builtin {
            Builtin::Slugify => self.slugify,
            Builtin::StripHtml => self.strip_html,
            Builtin::NormalizeWhitespace => self.normalize_whitespace,
            Builtin::Trim => self.trim,
        }
    }

    /// Enabled builtins in registry order.
    pub fn enabled(&self) -> impl Iterator<Item = Builtin> + '_ {
        Builtin::iter().filter(|builtin| self.is_enabled(*builtin))
    }
}

#[derive(Debug, Clone)]
pub enum TransformSpec {
    ByName(String),
    Custom(CustomTransform),
    FromOptions(TransformOptions),
}

impl From<&str> for TransformSpec {
    fn from(value: &str) -> Self {
        TransformSpec::ByName(value.to_owned())
    }
}

impl From<Builtin> for TransformSpec {
    fn from(value: Builtin) -> Self {
        TransformSpec::ByName(value.name().to_owned())
    }
}

impl From<CustomTransform> for TransformSpec {
    fn from(value: CustomTransform) -> Self {
        TransformSpec::Custom(value)
    }
}

impl From<TransformOptions> for TransformSpec {
    fn from(value: TransformOptions) -> Self {
        TransformSpec::FromOptions(value)
    }
}

/// A single resolved pipeline stage.
#[derive(Debug, Clone)]
pub enum Transform {
    Builtin(Builtin),
    Custom(CustomTransform),
}

impl Transform {
    pub fn apply(&self, text: &str, mode: Mode) -> String {
        match self {
            Transform::Builtin(builtin) => builtin.apply(text, mode),
            Transform::Custom(custom) => custom.apply(text, mode),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Transform::Builtin(builtin) => builtin.name(),
            Transform::Custom(custom) => custom.name(),
        }
    }
}

impl TransformSpec {
    /// Resolves the spec into pipeline stages. Unknown names are rejected.
    pub fn resolve(self) -> Result<Vec<Transform>, TransformError> {
        Ok(match self {
            TransformSpec::ByName(name) => vec![Transform::Builtin(name.parse()?)],
            TransformSpec::Custom(custom) => vec![Transform::Custom(custom)],
            TransformSpec::FromOptions(options) => {
                options.enabled().map(Transform::Builtin).collect()
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("slugify", Builtin::Slugify)]
    #[case("stripHtml", Builtin::StripHtml)]
    #[case("noHtml", Builtin::StripHtml)]
    #[case("normalizeWhitespace", Builtin::NormalizeWhitespace)]
    #[case("fix", Builtin::NormalizeWhitespace)]
    #[case("trim", Builtin::Trim)]
    fn builtin_names(#[case] name: &str, #[case] expected: Builtin) {
        assert_eq!(name.parse::<Builtin>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("Trim")]
    #[case("strip_html")]
    #[case("uppercase")]
    fn unknown_names_are_rejected(#[case] name: &str) {
        assert_eq!(
            name.parse::<Builtin>(),
            Err(TransformError::UnknownTransform(name.to_owned()))
        );
    }

    #[test]
    fn options_resolve_in_registry_order() {
        let options = TransformOptions { trim: true, slugify: true, ..Default::default() };

        let names: Vec<String> = TransformSpec::FromOptions(options)
            .resolve()
            .unwrap()
            .iter()
            .map(|t| t.name().to_owned())
            .collect();

        assert_eq!(names, vec!["slugify", "trim"]);
    }

    #[test]
    fn empty_options_resolve_to_nothing() {
        let resolved = TransformSpec::FromOptions(TransformOptions::default()).resolve().unwrap();

        assert!(resolved.is_empty());
    }

    #[test]
    fn custom_transform_receives_mode() {
        let custom =
            CustomTransform::new("mode", |text, mode| format!("{text}:{}", mode.is_live()));

        assert_eq!(custom.apply("a", Mode::Live), "a:true");
        assert_eq!(custom.apply("a", Mode::Final), "a:false");
    }
}
