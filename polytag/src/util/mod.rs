pub(crate) mod alloc;
pub(crate) mod io;
pub(crate) mod math;
pub(crate) mod text;
