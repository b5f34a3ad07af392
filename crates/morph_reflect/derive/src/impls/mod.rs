// -----------------------------------------------------------------------------
// Modules

mod common;
mod opaque_kind;
mod scalar_kind;
mod struct_kind;

// -----------------------------------------------------------------------------
// Internal API

use common::{hooks_tokens, impl_trait_reflect, impl_trait_typed};

pub(crate) use opaque_kind::impl_opaque;
pub(crate) use scalar_kind::impl_scalar;
pub(crate) use struct_kind::impl_struct;
