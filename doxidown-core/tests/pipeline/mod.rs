//! End-to-end pipeline tests: XML text in, rendered pages out.

mod fixtures;
mod html;
mod markdown;
