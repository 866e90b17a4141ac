#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use recast_codec as codec;
pub use recast_document as document;
pub use recast_utils as utils;

pub use recast_codec::{Recast, Recaster, doc};
