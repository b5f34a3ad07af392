use morph_reflect::hooks::HookError;
use morph_reflect::info::ReflectKind;
use thiserror::Error;

// -----------------------------------------------------------------------------
// ConvertError

/// The error returned by conversion and by the reference codec.
///
/// Only the presence of an error is meaningful for parity with the codec;
/// the message text is not part of the contract.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("unsupported shape: `{type_path}` is {kind}")]
    UnsupportedShape {
        type_path: &'static str,
        kind: ReflectKind,
    },

    #[error("only string keys are supported, found map key type `{type_path}`")]
    UnsupportedMapKey { type_path: &'static str },

    #[error("recursion exceeded {max_depth} levels, the value is probably cyclic")]
    CycleSuspected { max_depth: usize },

    #[error("text hook of `{type_path}` failed: {source}")]
    Hook {
        type_path: &'static str,
        #[source]
        source: HookError,
    },

    #[error("cannot decode {found} into `{type_path}`")]
    Decode {
        found: &'static str,
        type_path: &'static str,
    },

    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ConvertError> = core::result::Result<T, E>;

// -----------------------------------------------------------------------------
// Failure

/// An error inside the converter, tagged with how far it propagates.
///
/// A `Skip` does not stop the sibling fields or entries of the failing
/// value; loops remember the first one and report it when they finish.
/// Both unwrap to their cause at the top level.
#[derive(Debug)]
pub(crate) enum Failure {
    Abort(ConvertError),
    Skip(ConvertError),
}

impl Failure {
    #[inline]
    pub fn into_error(self) -> ConvertError {
        match self {
            Self::Abort(err) | Self::Skip(err) => err,
        }
    }
}

impl From<ConvertError> for Failure {
    #[inline]
    fn from(err: ConvertError) -> Self {
        Self::Abort(err)
    }
}

/// The result of one conversion step.
pub(crate) type Step = Result<(), Failure>;

/// Collects the first skipped error of a loop.
#[derive(Default)]
pub(crate) struct Skipped(Option<ConvertError>);

impl Skipped {
    /// Records a skip and lets an abort through.
    pub fn absorb(&mut self, step: Step) -> Step {
        match step {
            Err(Failure::Skip(err)) => {
                self.record(err);
                Ok(())
            }
            other => other,
        }
    }

    pub fn record(&mut self, err: ConvertError) {
        log::debug!("skipping after error: {err}");
        if self.0.is_none() {
            self.0 = Some(err);
        }
    }

    /// Reports the first recorded skip, if any.
    pub fn finish(self) -> Step {
        match self.0 {
            Some(err) => Err(Failure::Skip(err)),
            None => Ok(()),
        }
    }
}
