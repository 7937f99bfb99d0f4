pub(crate) mod assembler;
pub(crate) mod classify;
pub(crate) mod curve_encoder;
pub(crate) mod object;
pub(crate) mod report;
pub(crate) mod static_encoder;
