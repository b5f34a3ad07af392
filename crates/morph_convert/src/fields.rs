//! Field descriptors of records, and the cache that memoizes them.
//!
//! The descriptors of a record are its visible fields with the members of
//! embedded records promoted into it. Promotion is breadth first: a name
//! found at a shallower depth hides deeper ones, a renamed field beats an
//! untagged one at the same depth, and two equally good candidates hide
//! each other.

use core::any::TypeId;
use std::sync::{Arc, PoisonError, RwLock};

use morph_reflect::Reflect;
use morph_reflect::info::{FieldFlags, NamedField, ReflectKind, StructInfo, TypeInfo};
use morph_reflect::ops::{ReflectMut, ReflectRef};
use morph_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// Field

/// A converted field of a record.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    name_lower: Box<str>,
    index: Box<[usize]>,
    tagged: bool,
    omit_empty: bool,
    quoted: bool,
    type_info: &'static TypeInfo,
}

impl Field {
    fn new(field: &NamedField, index: Vec<usize>) -> Self {
        let name = field.serial_name();
        let flags = field.flags();
        let type_info = field.type_info();
        Self {
            name,
            name_lower: name.to_ascii_lowercase().into_boxed_str(),
            index: index.into_boxed_slice(),
            tagged: field.rename().is_some(),
            omit_empty: flags.contains(FieldFlags::OMIT_EMPTY),
            quoted: flags.contains(FieldFlags::QUOTED) && is_quotable(type_info),
            type_info,
        }
    }

    /// The serialization name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The serialization name in ASCII lowercase, used for matching keys.
    #[inline]
    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    /// Field indices from the outer record down through embedded members.
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    #[inline]
    pub fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    /// Whether the scalar value travels inside a quoted string.
    #[inline]
    pub fn quoted(&self) -> bool {
        self.quoted
    }

    /// The declared type of the field.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// Reads the field of `record`.
    ///
    /// Returns `None` when a nil embedded pointer lies on the way.
    pub(crate) fn read<'a>(&self, record: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        let mut current = record;
        for (depth, &index) in self.index.iter().enumerate() {
            if depth > 0
                && let ReflectRef::Pointer(pointer) = current.reflect_ref()
            {
                current = pointer.pointee()?;
            }
            current = match current.reflect_ref() {
                ReflectRef::Struct(record) => record.field_at(index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Returns the field of `record` for writing, allocating embedded
    /// pointers on the way.
    pub(crate) fn resolve_mut<'a>(&self, record: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        let mut current = record;
        for (depth, &index) in self.index.iter().enumerate() {
            if depth > 0 && current.reflect_kind() == ReflectKind::Pointer {
                current = match current.reflect_mut() {
                    ReflectMut::Pointer(pointer) => pointer.get_or_alloc(),
                    _ => return None,
                };
            }
            current = match current.reflect_mut() {
                ReflectMut::Struct(record) => record.field_at_mut(index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// `string` only applies to scalars, possibly behind one pointer.
fn is_quotable(info: &'static TypeInfo) -> bool {
    let info = match info {
        TypeInfo::Pointer(pointer) => pointer.pointee_info(),
        _ => info,
    };
    info.kind() == ReflectKind::Scalar
}

/// The record an embedded field promotes, if any.
fn promoted(field: &NamedField) -> Option<&'static StructInfo> {
    if !field.flags().contains(FieldFlags::EMBEDDED) || field.rename().is_some() {
        return None;
    }
    match field.type_info() {
        TypeInfo::Struct(info) => Some(info),
        TypeInfo::Pointer(pointer) => pointer.pointee_info().as_struct().ok(),
        _ => None,
    }
}

struct Pending {
    info: &'static StructInfo,
    index: Vec<usize>,
}

fn type_fields(root: &'static StructInfo) -> Vec<Field> {
    let mut fields = Vec::new();

    let mut next = vec![Pending {
        info: root,
        index: Vec::new(),
    }];
    let mut next_count = TypeIdMap::<usize>::new();
    let mut visited = TypeIdMap::<()>::new();

    while !next.is_empty() {
        let current = core::mem::take(&mut next);
        let count = core::mem::replace(&mut next_count, TypeIdMap::new());

        for pending in current {
            let type_id = pending.info.type_id();
            if visited.insert(type_id, ()).is_some() {
                continue;
            }
            for (i, field) in pending.info.iter().enumerate() {
                let mut index = pending.index.clone();
                index.push(i);

                let Some(inner) = promoted(field) else {
                    let entry = Field::new(field, index);
                    // The same record embedded twice at one depth: keep a
                    // twin so both copies annihilate below.
                    if count.get(&type_id).is_some_and(|&n| n > 1) {
                        fields.push(entry.clone());
                    }
                    fields.push(entry);
                    continue;
                };

                let seen = next_count.get_or_insert(inner.type_id(), || 0);
                *seen += 1;
                if *seen == 1 {
                    next.push(Pending { info: inner, index });
                }
            }
        }
    }

    fields.sort_by(|a, b| {
        a.name
            .cmp(b.name)
            .then(a.index.len().cmp(&b.index.len()))
            .then(b.tagged.cmp(&a.tagged))
            .then(a.index.cmp(&b.index))
    });

    let mut dominant = Vec::with_capacity(fields.len());
    for group in fields.chunk_by(|a, b| a.name == b.name) {
        let ambiguous = match group {
            [first, second, ..] => {
                first.index.len() == second.index.len() && first.tagged == second.tagged
            }
            _ => false,
        };
        if !ambiguous {
            dominant.push(group[0].clone());
        }
    }

    dominant.sort_by(|a, b| a.index.cmp(&b.index));
    dominant
}

// -----------------------------------------------------------------------------
// FieldCache

/// Memoized [`Field`] lists, one per record type.
///
/// Entries are built on first request and never evicted. Concurrent
/// callers may build the same entry twice; the first insert wins.
///
/// ```
/// use morph_convert::FieldCache;
/// use morph_reflect::{Reflect, Typed};
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     pub x: f64,
///     #[morph(rename = "Y")]
///     pub y: f64,
/// }
///
/// let cache = FieldCache::new();
/// let fields = cache.fields(Point::type_info());
/// let names: Vec<_> = fields.iter().map(|field| field.name()).collect();
/// assert_eq!(names, ["x", "Y"]);
/// ```
pub struct FieldCache {
    fields: RwLock<TypeIdMap<Arc<[Field]>>>,
}

impl FieldCache {
    #[inline]
    pub const fn new() -> Self {
        Self {
            fields: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The process-wide cache used by [`convert`](crate::convert) and friends.
    pub fn shared() -> &'static FieldCache {
        static SHARED: FieldCache = FieldCache::new();
        &SHARED
    }

    /// Returns the fields of a record type. Other kinds have none.
    pub fn fields(&self, info: &'static TypeInfo) -> Arc<[Field]> {
        let type_id = info.type_id();
        if let Some(fields) = self.cached(&type_id) {
            return fields;
        }

        // Built outside the lock: field types may be records themselves.
        let built: Arc<[Field]> = match info {
            TypeInfo::Struct(record) => type_fields(record).into(),
            _ => Vec::new().into(),
        };
        log::trace!("cached {} fields of `{}`", built.len(), info.type_path());

        let mut fields = self.fields.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(fields.get_or_insert(type_id, || built))
    }

    fn cached(&self, type_id: &TypeId) -> Option<Arc<[Field]>> {
        self.fields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_id)
            .cloned()
    }
}

impl Default for FieldCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
