// Application layer: use cases built on the models, driven by the binary.

pub mod convert;
