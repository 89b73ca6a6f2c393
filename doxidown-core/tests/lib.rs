// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod pipeline;
