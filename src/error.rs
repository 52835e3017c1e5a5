/// Failures while bringing up the window and the GPU. None of these are recoverable.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Can't create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Can't find a GPU that can present to the window")]
    NoAdapter,
    #[error("Can't bind GPU: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("Window surface reports no supported formats")]
    IncompatibleSurface,
    #[error("Shader pipeline failed validation: {0}")]
    Shader(String),
}
