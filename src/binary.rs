/// Read binary data
pub mod read;

#[derive(Copy, Clone)]
pub enum U8 {}

#[derive(Copy, Clone)]
pub enum I32Be {}

/// Little-endian `u32`, used for PFB record lengths.
#[derive(Copy, Clone)]
pub enum U32Le {}
