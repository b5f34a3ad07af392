use core::any::Any;
use core::fmt;

use crate::hooks::TextHooks;
use crate::info::{Type, Typed, impl_type_fn};
use crate::ops::Scalar;

// -----------------------------------------------------------------------------
// ScalarKind

/// The primitive behind a scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
}

impl ScalarKind {
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize)
    }

    #[inline]
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize)
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Integers and floats.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.is_signed() || self.is_unsigned() || self.is_float()
    }

    /// The inclusive range of an integer kind, as `i128`.
    pub const fn int_range(self) -> Option<(i128, i128)> {
        let range = match self {
            Self::I8 => (i8::MIN as i128, i8::MAX as i128),
            Self::I16 => (i16::MIN as i128, i16::MAX as i128),
            Self::I32 => (i32::MIN as i128, i32::MAX as i128),
            Self::I64 => (i64::MIN as i128, i64::MAX as i128),
            Self::Isize => (isize::MIN as i128, isize::MAX as i128),
            Self::U8 => (0, u8::MAX as i128),
            Self::U16 => (0, u16::MAX as i128),
            Self::U32 => (0, u32::MAX as i128),
            Self::U64 => (0, u64::MAX as i128),
            Self::Usize => (0, usize::MAX as i128),
            _ => return None,
        };
        Some(range)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
        })
    }
}

// -----------------------------------------------------------------------------
// ScalarTyped

/// A scalar type with a statically known [`ScalarKind`].
///
/// Newtypes derived with `#[morph(scalar)]` inherit the kind of their
/// inner type, so they behave as aliases of it.
pub trait ScalarTyped: Scalar + Typed {
    const KIND: ScalarKind;
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Type information of a boolean, number or string type.
#[derive(Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
    hooks: TextHooks,
}

impl ScalarInfo {
    impl_type_fn!();

    #[inline]
    pub fn new<T: Any>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            hooks: TextHooks::empty(),
        }
    }

    #[inline]
    pub fn with_text_hooks(mut self, hooks: TextHooks) -> Self {
        self.hooks = hooks;
        self
    }

    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    #[inline]
    pub const fn text_hooks(&self) -> TextHooks {
        self.hooks
    }
}
