//! Codec capability detection
//!
//! Decoder backends are a compile-time property of this crate's features.
//! The query runs once in `main` and is passed explicitly into the decode
//! boundary instead of being consulted ad hoc.

/// Which pixel-data decoder backends were compiled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecSupport {
    /// Pure-Rust decoders for JPEG-family and RLE transfer syntaxes
    pub native: bool,
    /// GDCM-backed decoding
    pub gdcm: bool,
}

impl CodecSupport {
    #[must_use]
    pub fn detect() -> Self {
        Self {
            native: cfg!(feature = "native"),
            gdcm: cfg!(feature = "gdcm"),
        }
    }

    /// True when at least one backend can handle compressed pixel data
    #[inline]
    #[must_use]
    pub fn any(&self) -> bool {
        self.native || self.gdcm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_requires_at_least_one_backend() {
        let none = CodecSupport {
            native: false,
            gdcm: false,
        };
        assert!(!none.any());

        let native_only = CodecSupport {
            native: true,
            gdcm: false,
        };
        assert!(native_only.any());

        let gdcm_only = CodecSupport {
            native: false,
            gdcm: true,
        };
        assert!(gdcm_only.any());
    }
}
