// src/application/ports/util.rs

/// Turns free text into a URL-safe token. Implementations must be pure and
/// deterministic: lowercase output, runs of other characters collapsed to a
/// single hyphen, no leading or trailing hyphen, `""` for empty input.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
