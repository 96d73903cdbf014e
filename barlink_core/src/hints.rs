//! Typed decode and encode hints.
//!
//! Each hint this layer understands has a named field. Anything else is kept verbatim in a passthrough bag so that
//! engine specific options survive the trip.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Error, Result, Symbology};

/// Value of a loosely typed hint, as found in a caller's option mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintValue {
    Flag(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

impl HintValue {
    fn kind(&self) -> &'static str {
        match self {
            HintValue::Flag(_) => "flag",
            HintValue::Int(_) => "integer",
            HintValue::Text(_) => "string",
            HintValue::List(_) => "list",
        }
    }

    pub(crate) fn into_flag(self, key: &str) -> Result<bool> {
        match self {
            HintValue::Flag(flag) => Ok(flag),
            other => Err(mismatch(key, "a flag", &other)),
        }
    }

    pub(crate) fn into_text(self, key: &str) -> Result<String> {
        match self {
            HintValue::Text(text) => Ok(text),
            HintValue::Int(n) => Ok(n.to_string()),
            other => Err(mismatch(key, "a string", &other)),
        }
    }

    pub(crate) fn into_list(self, key: &str) -> Result<Vec<String>> {
        match self {
            HintValue::List(items) => Ok(items),
            HintValue::Text(item) => Ok(vec![item]),
            other => Err(mismatch(key, "a list of strings", &other)),
        }
    }

    pub(crate) fn into_uint(self, key: &str) -> Result<u32> {
        let parsed = match &self {
            HintValue::Int(n) => u32::try_from(*n).ok(),
            HintValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| mismatch(key, "a non-negative integer", &self))
    }

    pub(crate) fn into_int(self, key: &str) -> Result<i32> {
        let parsed = match &self {
            HintValue::Int(n) => i32::try_from(*n).ok(),
            HintValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| mismatch(key, "an integer", &self))
    }

    /// Read a list of non-negative integers, given as a list, a single integer or a comma separated string.
    pub(crate) fn into_uint_list(self, key: &str) -> Result<Vec<u32>> {
        let items = match &self {
            HintValue::Int(n) => vec![n.to_string()],
            HintValue::Text(text) => text.split(',').map(str::to_string).collect(),
            HintValue::List(items) => items.clone(),
            HintValue::Flag(_) => return Err(mismatch(key, "a list of non-negative integers", &self)),
        };
        items
            .iter()
            .map(|item| item.trim().parse())
            .collect::<std::result::Result<Vec<u32>, _>>()
            .map_err(|_| mismatch(key, "a list of non-negative integers", &self))
    }
}

fn mismatch(key: &str, expected: &str, found: &HintValue) -> Error {
    Error::InvalidArgument(format!(
        "hint {} must be {}, got {} {:?}",
        key,
        expected,
        found.kind(),
        found
    ))
}

impl From<bool> for HintValue {
    fn from(value: bool) -> Self {
        HintValue::Flag(value)
    }
}

impl From<i64> for HintValue {
    fn from(value: i64) -> Self {
        HintValue::Int(value)
    }
}

impl From<u32> for HintValue {
    fn from(value: u32) -> Self {
        HintValue::Int(value.into())
    }
}

impl From<&str> for HintValue {
    fn from(value: &str) -> Self {
        HintValue::Text(value.to_string())
    }
}

impl From<String> for HintValue {
    fn from(value: String) -> Self {
        HintValue::Text(value)
    }
}

impl From<Vec<String>> for HintValue {
    fn from(value: Vec<String>) -> Self {
        HintValue::List(value)
    }
}

impl From<Vec<&str>> for HintValue {
    fn from(value: Vec<&str>) -> Self {
        HintValue::List(value.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HintValue {
    fn from(value: [&str; N]) -> Self {
        HintValue::List(value.into_iter().map(String::from).collect())
    }
}

impl From<&[Symbology]> for HintValue {
    fn from(value: &[Symbology]) -> Self {
        HintValue::List(value.iter().map(|s| s.name().to_string()).collect())
    }
}

/// Hints for the decode entry points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeHints {
    /// Spend more time looking for a symbol.
    pub try_harder: Option<bool>,
    /// The image is a clean, unrotated rendering of a single symbol.
    pub pure_barcode: Option<bool>,
    /// Restrict the search to these symbologies.
    pub possible_formats: Option<BTreeSet<Symbology>>,
    /// Character set used to interpret byte payloads.
    pub character_set: Option<String>,
    /// Also try the image with light and dark swapped.
    pub also_inverted: Option<bool>,
    /// Hints not interpreted by this layer, forwarded as given.
    pub passthrough: BTreeMap<String, HintValue>,
}

impl DecodeHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build hints from a loose option mapping. Keys are case insensitive.
    /// # Example
    /// ```
    /// use barlink_core::{DecodeHints, HintValue, Symbology};
    /// let hints = DecodeHints::from_options([
    ///     ("try_harder", HintValue::from(true)),
    ///     ("POSSIBLE_FORMATS", HintValue::from(["QR_CODE"])),
    /// ]).unwrap();
    /// assert_eq!(hints.try_harder, Some(true));
    /// assert!(hints.possible_formats.unwrap().contains(&Symbology::QrCode));
    /// ```
    pub fn from_options<I, K>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, HintValue)>,
        K: AsRef<str>,
    {
        let mut hints = Self::default();
        for (key, value) in options {
            let key = key.as_ref();
            match key.to_ascii_uppercase().as_str() {
                "TRY_HARDER" => hints.try_harder = Some(value.into_flag(key)?),
                "PURE_BARCODE" => hints.pure_barcode = Some(value.into_flag(key)?),
                "POSSIBLE_FORMATS" => {
                    let formats = value
                        .into_list(key)?
                        .iter()
                        .map(|name| name.parse::<Symbology>())
                        .collect::<Result<BTreeSet<_>>>()?;
                    hints.possible_formats = (!formats.is_empty()).then_some(formats);
                }
                "CHARACTER_SET" => hints.character_set = Some(value.into_text(key)?),
                "ALSO_INVERTED" => hints.also_inverted = Some(value.into_flag(key)?),
                _ => {
                    hints.passthrough.insert(key.to_string(), value);
                }
            }
        }
        Ok(hints)
    }

    pub fn with_try_harder(mut self, enabled: bool) -> Self {
        self.try_harder = Some(enabled);
        self
    }

    pub fn with_pure_barcode(mut self, enabled: bool) -> Self {
        self.pure_barcode = Some(enabled);
        self
    }

    /// Restrict decoding to the symbologies yielded by `iter`. An empty iterator lifts the restriction.
    pub fn with_possible_formats<I: IntoIterator<Item = Symbology>>(mut self, iter: I) -> Self {
        let formats: BTreeSet<_> = iter.into_iter().collect();
        self.possible_formats = (!formats.is_empty()).then_some(formats);
        self
    }

    pub fn with_character_set(mut self, charset: &str) -> Self {
        self.character_set = Some(charset.to_string());
        self
    }

    pub fn with_also_inverted(mut self, enabled: bool) -> Self {
        self.also_inverted = Some(enabled);
        self
    }

    /// Forward a hint this layer does not interpret.
    pub fn with_passthrough<V: Into<HintValue>>(mut self, key: &str, value: V) -> Self {
        self.passthrough.insert(key.to_string(), value.into());
        self
    }
}

/// Highest QR code version.
const MAX_QR_VERSION: u32 = 40;

/// Hints for the generation entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeHints {
    /// Error correction level, in the symbology's own notation (e.g. `L`/`M`/`Q`/`H` for QR codes).
    pub error_correction: Option<String>,
    /// Character set used to encode the payload.
    pub character_set: Option<String>,
    /// Quiet zone size, in modules.
    pub margin: Option<u32>,
    /// Force a QR code version, 1 to 40.
    pub qr_version: Option<u32>,
    /// Hints not interpreted by this layer, forwarded as given.
    pub passthrough: BTreeMap<String, HintValue>,
}

impl EncodeHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build hints from a loose option mapping. Keys are case insensitive.
    /// # Example
    /// ```
    /// use barlink_core::{EncodeHints, HintValue};
    /// let hints = EncodeHints::from_options([("MARGIN", HintValue::from("2"))]).unwrap();
    /// assert_eq!(hints.margin, Some(2));
    /// assert!(EncodeHints::from_options([("QR_VERSION", HintValue::from(41u32))]).is_err());
    /// ```
    pub fn from_options<I, K>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, HintValue)>,
        K: AsRef<str>,
    {
        let mut hints = Self::default();
        for (key, value) in options {
            let key = key.as_ref();
            match key.to_ascii_uppercase().as_str() {
                "ERROR_CORRECTION" => hints.error_correction = Some(value.into_text(key)?),
                "CHARACTER_SET" => hints.character_set = Some(value.into_text(key)?),
                "MARGIN" => hints.margin = Some(value.into_uint(key)?),
                "QR_VERSION" => hints.qr_version = Some(check_qr_version(value.into_uint(key)?)?),
                _ => {
                    hints.passthrough.insert(key.to_string(), value);
                }
            }
        }
        Ok(hints)
    }

    pub fn with_error_correction(mut self, level: &str) -> Self {
        self.error_correction = Some(level.to_string());
        self
    }

    pub fn with_character_set(mut self, charset: &str) -> Self {
        self.character_set = Some(charset.to_string());
        self
    }

    pub fn with_margin(mut self, modules: u32) -> Self {
        self.margin = Some(modules);
        self
    }

    /// Force the QR code `version`. Fails if it is outside 1..=40.
    pub fn with_qr_version(mut self, version: u32) -> Result<Self> {
        self.qr_version = Some(check_qr_version(version)?);
        Ok(self)
    }

    /// Forward a hint this layer does not interpret.
    pub fn with_passthrough<V: Into<HintValue>>(mut self, key: &str, value: V) -> Self {
        self.passthrough.insert(key.to_string(), value.into());
        self
    }
}

fn check_qr_version(version: u32) -> Result<u32> {
    if (1..=MAX_QR_VERSION).contains(&version) {
        Ok(version)
    } else {
        Err(Error::InvalidArgument(format!(
            "QR code version must be between 1 and {}, got {}",
            MAX_QR_VERSION, version
        )))
    }
}
