use thiserror::Error;
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("column `{name}` not found in table")]
    MissingColumn { name: String },
    #[error("column `{name}` is not numeric")]
    NonNumericColumn { name: String },
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    #[error("input signal is empty")]
    EmptyInput,
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
impl TelemetryError {
    pub(crate) fn missing(name: &str) -> Self {
        TelemetryError::MissingColumn {
            name: name.to_owned(),
        }
    }
}
impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for TelemetryError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        TelemetryError::Plot(format!("drawing failed: {err}"))
    }
}
impl From<image::ImageError> for TelemetryError {
    fn from(err: image::ImageError) -> Self {
        TelemetryError::Plot(format!("png encoding failed: {err}"))
    }
}
