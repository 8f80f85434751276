// Dataset open options and their environment-variable forms.
use crate::core::decode::DecodeOptions;
use crate::core::error::{Error, ErrorKind};
use crate::core::version::{KNOWN_VERSIONS, TigerVersion};

pub const VERSION_ENV: &str = "TIGER_VERSION";
pub const LFIELD_AS_STRING_ENV: &str = "TIGER_LFIELD_AS_STRING";

/// Forced dataset version: a version name or a raw code run through `classify`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VersionOverride {
    Code(u32),
    Named(TigerVersion),
}

impl VersionOverride {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        if !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit()) {
            return text.parse().map(VersionOverride::Code).map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!("version code out of range: {text}"))
                    .with_source(err)
            });
        }
        TigerVersion::from_name(text)
            .map(VersionOverride::Named)
            .ok_or_else(|| {
                let names: Vec<&str> = KNOWN_VERSIONS
                    .iter()
                    .map(|version| version.as_str())
                    .collect();
                Error::new(ErrorKind::Usage)
                    .with_message(format!("unrecognized TIGER version: {text}"))
                    .with_hint(format!("Use a version code or one of: {}.", names.join(", ")))
            })
    }

    pub fn resolve(self) -> TigerVersion {
        match self {
            VersionOverride::Code(code) => TigerVersion::classify(code),
            VersionOverride::Named(version) => version,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OpenOptions {
    pub version_override: Option<VersionOverride>,
    pub lfield_as_string: bool,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version_override(mut self, version: VersionOverride) -> Self {
        self.version_override = Some(version);
        self
    }

    pub fn with_lfield_as_string(mut self, enabled: bool) -> Self {
        self.lfield_as_string = enabled;
        self
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build options from a key lookup; unset or empty keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut options = Self::new();
        if let Some(value) = lookup(VERSION_ENV).filter(|value| !value.trim().is_empty()) {
            options.version_override = Some(VersionOverride::parse(&value)?);
        }
        if let Some(value) = lookup(LFIELD_AS_STRING_ENV) {
            options.lfield_as_string = parse_flag(&value);
        }
        Ok(options)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            lfield_as_string: self.lfield_as_string,
        }
    }
}

// Anything but an explicit "off" spelling enables the flag.
fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || ["0", "no", "false", "off"]
            .iter()
            .any(|off| value.eq_ignore_ascii_case(off)))
}
