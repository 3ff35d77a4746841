#![allow(missing_docs)]

mod flac;
mod mpeg;
pub(crate) mod util;
