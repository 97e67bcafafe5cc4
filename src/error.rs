use thiserror::Error;

use crate::input::InputError;
use crate::pipeline::align::AlignError;
use crate::pipeline::identity::IdentityError;
use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
