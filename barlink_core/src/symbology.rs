use std::str::FromStr;

use rxing::BarcodeFormat;

use crate::Error;

/// Barcode symbology known to the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbology {
    Aztec,
    Codabar,
    Code39,
    Code93,
    Code128,
    DataMatrix,
    Ean8,
    Ean13,
    Itf,
    MaxiCode,
    Pdf417,
    QrCode,
    Rss14,
    RssExpanded,
    UpcA,
    UpcE,
    UpcEanExtension,
}

impl Symbology {
    /// Every symbology, in declaration order.
    #[rustfmt::skip]
    pub const ALL: [Symbology; 17] = [
        Self::Aztec, Self::Codabar, Self::Code39, Self::Code93, Self::Code128, Self::DataMatrix,
        Self::Ean8, Self::Ean13, Self::Itf, Self::MaxiCode, Self::Pdf417, Self::QrCode,
        Self::Rss14, Self::RssExpanded, Self::UpcA, Self::UpcE, Self::UpcEanExtension,
    ];

    /// Get the canonical upper-case name.
    /// # Example
    /// ```
    /// use barlink_core::Symbology;
    /// assert_eq!(Symbology::QrCode.name(), "QR_CODE");
    /// assert_eq!(Symbology::UpcEanExtension.name(), "UPC_EAN_EXTENSION");
    /// ```
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aztec => "AZTEC",
            Self::Codabar => "CODABAR",
            Self::Code39 => "CODE_39",
            Self::Code93 => "CODE_93",
            Self::Code128 => "CODE_128",
            Self::DataMatrix => "DATA_MATRIX",
            Self::Ean8 => "EAN_8",
            Self::Ean13 => "EAN_13",
            Self::Itf => "ITF",
            Self::MaxiCode => "MAXICODE",
            Self::Pdf417 => "PDF_417",
            Self::QrCode => "QR_CODE",
            Self::Rss14 => "RSS_14",
            Self::RssExpanded => "RSS_EXPANDED",
            Self::UpcA => "UPC_A",
            Self::UpcE => "UPC_E",
            Self::UpcEanExtension => "UPC_EAN_EXTENSION",
        }
    }

    /// Whether the symbology is a linear (1D) barcode.
    pub fn is_linear(self) -> bool {
        matches!(
            self,
            Self::Codabar
                | Self::Code39
                | Self::Code93
                | Self::Code128
                | Self::Ean8
                | Self::Ean13
                | Self::Itf
                | Self::Rss14
                | Self::RssExpanded
                | Self::UpcA
                | Self::UpcE
                | Self::UpcEanExtension
        )
    }
}

/// Reduce a symbology name to upper-case alphanumerics, so that `qr_code`, `QR-CODE` and `qrcode` compare equal.
fn normalized(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl FromStr for Symbology {
    type Err = Error;

    /// Parse a symbology name.
    /// # Example
    /// ```
    /// use barlink_core::Symbology;
    /// assert_eq!("QR_CODE".parse::<Symbology>().unwrap(), Symbology::QrCode);
    /// assert_eq!("code128".parse::<Symbology>().unwrap(), Symbology::Code128);
    /// assert!("INVALID_FORMAT_XYZ".parse::<Symbology>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalized(s);
        Self::ALL
            .into_iter()
            .find(|symbology| normalized(symbology.name()) == wanted)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown barcode format '{}'", s)))
    }
}

impl std::fmt::Display for Symbology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Symbology> for BarcodeFormat {
    fn from(value: Symbology) -> Self {
        match value {
            Symbology::Aztec => BarcodeFormat::AZTEC,
            Symbology::Codabar => BarcodeFormat::CODABAR,
            Symbology::Code39 => BarcodeFormat::CODE_39,
            Symbology::Code93 => BarcodeFormat::CODE_93,
            Symbology::Code128 => BarcodeFormat::CODE_128,
            Symbology::DataMatrix => BarcodeFormat::DATA_MATRIX,
            Symbology::Ean8 => BarcodeFormat::EAN_8,
            Symbology::Ean13 => BarcodeFormat::EAN_13,
            Symbology::Itf => BarcodeFormat::ITF,
            Symbology::MaxiCode => BarcodeFormat::MAXICODE,
            Symbology::Pdf417 => BarcodeFormat::PDF_417,
            Symbology::QrCode => BarcodeFormat::QR_CODE,
            Symbology::Rss14 => BarcodeFormat::RSS_14,
            Symbology::RssExpanded => BarcodeFormat::RSS_EXPANDED,
            Symbology::UpcA => BarcodeFormat::UPC_A,
            Symbology::UpcE => BarcodeFormat::UPC_E,
            Symbology::UpcEanExtension => BarcodeFormat::UPC_EAN_EXTENSION,
        }
    }
}

impl TryFrom<&BarcodeFormat> for Symbology {
    type Error = Error;

    fn try_from(value: &BarcodeFormat) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|symbology| BarcodeFormat::from(*symbology) == *value)
            .ok_or_else(|| {
                Error::FormatError(format!("engine reported unsupported format '{}'", value))
            })
    }
}
