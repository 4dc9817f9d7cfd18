//! Page model types shared by the analysis stages.
//!
//! Input pages come in as [`PageInput`], get turned into [`PageRecord`]s by
//! the term matcher, and are then mutated in place by the statistics and
//! classification stages. Every record carries exactly one
//! [`Classification`].

mod label;
mod page;

pub use label::Classification;
pub use page::{PageInput, PageRecord};
