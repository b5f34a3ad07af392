#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use morph_convert as convert;
pub use morph_reflect as reflect;
pub use morph_utils as utils;

pub use morph_convert::{Converter, Options, Transformed, convert, convert_to, convert_to_with, convert_with};
pub use morph_reflect::{Reflect, Value};
