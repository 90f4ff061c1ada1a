//! Run configuration for the record transformer.

use crate::error::ConfigError;

pub const DEFAULT_BARCODE: &str = "CATATAC";
pub const DEFAULT_UMI_LENGTH: usize = 8;
pub const DEFAULT_LINKER_LENGTH: usize = 6;

/// Immutable settings shared by every record of a run.
///
/// Construct through [`TransformConfig::builder`]; `build` rejects an empty
/// barcode so a `TransformConfig` in hand is always usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    barcode: Vec<u8>,
    umi_length: usize,
    linker_length: usize,
    remove_linker: bool,
    umi_first: bool,
}

impl TransformConfig {
    pub fn builder() -> TransformConfigBuilder {
        TransformConfigBuilder::default()
    }

    #[inline]
    pub fn barcode(&self) -> &[u8] {
        &self.barcode
    }
    #[inline]
    pub fn umi_length(&self) -> usize {
        self.umi_length
    }
    #[inline]
    pub fn linker_length(&self) -> usize {
        self.linker_length
    }
    #[inline]
    pub fn remove_linker(&self) -> bool {
        self.remove_linker
    }
    #[inline]
    pub fn umi_first(&self) -> bool {
        self.umi_first
    }

    /// Minimum read length accepted when the linker is removed.
    #[inline]
    pub fn required_length(&self) -> usize {
        self.umi_length.saturating_add(self.linker_length)
    }

    /// Leading bases excised from the carried-through tail. The UMI always
    /// moves next to the barcode; the linker only goes when `remove_linker`.
    #[inline]
    pub fn skip(&self) -> usize {
        if self.remove_linker {
            self.required_length()
        } else {
            self.umi_length
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            barcode: DEFAULT_BARCODE.as_bytes().to_vec(),
            umi_length: DEFAULT_UMI_LENGTH,
            linker_length: DEFAULT_LINKER_LENGTH,
            remove_linker: false,
            umi_first: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformConfigBuilder {
    inner: TransformConfig,
}

impl Default for TransformConfigBuilder {
    fn default() -> Self {
        Self {
            inner: TransformConfig::default(),
        }
    }
}

impl TransformConfigBuilder {
    pub fn barcode(mut self, barcode: impl Into<Vec<u8>>) -> Self {
        self.inner.barcode = barcode.into();
        self
    }
    pub fn umi_length(mut self, n: usize) -> Self {
        self.inner.umi_length = n;
        self
    }
    pub fn linker_length(mut self, n: usize) -> Self {
        self.inner.linker_length = n;
        self
    }
    pub fn remove_linker(mut self, yes: bool) -> Self {
        self.inner.remove_linker = yes;
        self
    }
    pub fn umi_first(mut self, yes: bool) -> Self {
        self.inner.umi_first = yes;
        self
    }

    pub fn build(self) -> Result<TransformConfig, ConfigError> {
        if self.inner.barcode.is_empty() {
            return Err(ConfigError::EmptyBarcode);
        }
        Ok(self.inner)
    }
}

/// Convert a signed command-line length into a `usize`, rejecting negatives.
pub fn checked_length(option: &'static str, value: i64) -> Result<usize, ConfigError> {
    if value < 0 {
        return Err(ConfigError::NegativeLength { option, value });
    }
    usize::try_from(value).map_err(|_| ConfigError::LengthOverflow { option, value })
}
