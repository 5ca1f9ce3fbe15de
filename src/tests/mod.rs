//! End-to-end decoding tests over whole tags.
