// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Classification and soft filtering of structural variant breakend calls.
//!
//! A record (a breakend pair in `t[p[` style notation, or a single breakend `t.`)
//! is parsed into a [`variants::breakends::BreakendPair`], classified into a
//! [`variants::classification::VariantClassification`] and wrapped together with
//! its per-sample support into a [`variants::context::StructuralVariantContext`].
//! The context exposes every soft filter predicate; the [`filtration`] module
//! evaluates them and annotates BCF/VCF records.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate strum_macros;
#[macro_use]
extern crate getset;
#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate derive_new;

pub mod classify;
pub mod cli;
pub mod errors;
pub mod filtration;
pub(crate) mod utils;
pub mod variants;

pub use crate::filtration::params::FilterParams;
pub use crate::variants::classification::{ClassifierParams, VariantClassification};
pub use crate::variants::context::StructuralVariantContext;
