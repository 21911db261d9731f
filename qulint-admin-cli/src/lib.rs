//! qulint-admin CLI library

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod templates;

pub use commands::{ColumnsCommand, ScaffoldCommand, WriteOutcome};
pub use templates::ScreenTemplate;

use qulint_admin::scaffold::Artifact;

/// Artifact selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArtifactArg {
    /// Form definition
    Form,
    /// Detail definition
    Show,
    /// Listing definition
    Grid,
}

impl From<ArtifactArg> for Artifact {
    fn from(arg: ArtifactArg) -> Self {
        match arg {
            ArtifactArg::Form => Self::Form,
            ArtifactArg::Show => Self::Show,
            ArtifactArg::Grid => Self::Grid,
        }
    }
}
