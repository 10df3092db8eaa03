use thiserror::Error;

/// Errors raised by the raster surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors that can occur while importing an image onto the canvas
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to read image file: {0}")]
    Read(#[from] std::io::Error),

    /// The picker task ended without delivering a result
    #[error("Image import was interrupted")]
    Interrupted,
}

/// Errors that can occur while exporting the canvas
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Browser download failed: {0}")]
    Browser(String),
}

/// Errors that can occur while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Top-level error for the paint application
#[derive(Debug, Error)]
pub enum PaintError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for fallible paint operations
pub type PaintResult<T> = Result<T, PaintError>;
