use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("NPY read error: {0}")]
    Npy(#[from] ndarray_npy::ReadNpyError),

    #[error("NPY write error: {0}")]
    NpyWrite(#[from] ndarray_npy::WriteNpyError),

    #[error("Annotation parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Cluster image is empty")]
    EmptyImage,

    #[error("Invalid cluster label {value} at ({row}, {col}); labels start at 1")]
    InvalidLabel { row: usize, col: usize, value: i64 },

    #[error(
        "Reference image {}x{} is not 1x or 2x the cluster image {}x{}",
        reference.1, reference.0, base.1, base.0
    )]
    ReferenceScale {
        base: (usize, usize),
        reference: (usize, usize),
    },

    #[error("{count} clusters exceed the supported maximum of {max}")]
    TooManyClusters { count: usize, max: usize },

    #[error("Invalid annotation: {0}")]
    AnnotationFormat(String),

    #[error("Cluster index {index} out of range (clusters: {total})")]
    ClusterOutOfRange { index: usize, total: usize },

    #[error("Pointer position ({x}, {y}) cannot be mapped to a pixel")]
    PointerOutOfBounds { x: f64, y: f64 },

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Unsupported array layout: {0}")]
    UnsupportedLayout(String),
}

pub type Result<T> = std::result::Result<T, AnnotatorError>;
