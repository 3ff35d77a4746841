pub(crate) mod mappings;
pub(crate) mod synchsafe;
pub(crate) mod upgrade;
