//! Values with custom text hooks go through the codec.
//!
//! A pair takes this route when the source can encode itself (directly
//! or behind one pointer) or the destination can decode itself. The
//! built-in [`Timestamp`] skips the codec for copies, formatting and
//! parsing.

use morph_reflect::hooks::{HookError, TextHooks};
use morph_reflect::impls::{format_timestamp, parse_timestamp};
use morph_reflect::info::{ScalarKind, TypeInfo};
use morph_reflect::ops::{Primitive, ReflectMut, ReflectRef};
use morph_reflect::{Reflect, Timestamp};

use crate::error::{Failure, Step};
use crate::{ConvertError, FieldCache, codec};

/// Whether the pair must be converted by the codec.
pub(crate) fn participates(src: &dyn Reflect, dst: &dyn Reflect) -> bool {
    let encodes = match src.reflect_type_info() {
        TypeInfo::Pointer(pointer) => pointer.pointee_info().text_hooks(),
        info => info.text_hooks(),
    }
    .contains(TextHooks::ENCODE);
    encodes || dst.reflect_type_info().text_hooks().contains(TextHooks::DECODE)
}

/// Converts a pair with text hooks.
///
/// Every failure is a skip: siblings of the value still convert.
pub(crate) fn convert(src: &dyn Reflect, dst: &mut dyn Reflect, cache: &FieldCache) -> Step {
    if let Some(step) = timestamp_fast_path(src, dst) {
        return step;
    }
    log::debug!(
        "converting `{}` into `{}` through the codec",
        src.reflect_type_info().type_path(),
        dst.reflect_type_info().type_path(),
    );
    codec::round_trip(src, dst, cache).map_err(Failure::Skip)
}

fn timestamp_fast_path(src: &dyn Reflect, dst: &mut dyn Reflect) -> Option<Step> {
    let src = deref(src)?;

    if let Some(ts) = src.downcast_ref::<Timestamp>() {
        let dst_info = dst.reflect_type_info();
        let points_to_timestamp = matches!(
            dst_info,
            TypeInfo::Pointer(pointer) if pointer.pointee_info().ty().is::<Timestamp>()
        );
        match dst.reflect_mut() {
            ReflectMut::Opaque(out) => *out.downcast_mut::<Timestamp>()? = *ts,
            ReflectMut::Pointer(pointer) if points_to_timestamp => {
                *pointer.get_or_alloc().downcast_mut::<Timestamp>()? = *ts;
            }
            ReflectMut::Scalar(scalar)
                if scalar.scalar_kind() == ScalarKind::String && dst_info.text_hooks().is_empty() =>
            {
                scalar.set(Primitive::Str(&format_timestamp(ts)));
            }
            _ => return None,
        }
        return Some(Ok(()));
    }

    let out = dst.downcast_mut::<Timestamp>()?;
    let ReflectRef::Scalar(scalar) = src.reflect_ref() else {
        return None;
    };
    let Primitive::Str(text) = scalar.get() else {
        return None;
    };
    Some(match parse_timestamp(text) {
        Ok(ts) => {
            *out = ts;
            Ok(())
        }
        Err(err) => Err(Failure::Skip(ConvertError::Hook {
            type_path: out.reflect_type_info().type_path(),
            source: HookError::from_error(err),
        })),
    })
}

/// Follows pointers. Returns `None` for a nil one.
fn deref(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
    while let ReflectRef::Pointer(pointer) = value.reflect_ref() {
        value = pointer.pointee()?;
    }
    Some(value)
}
